//! World state for scenario execution.
//!
//! The World owns both trunks, the shared clock and the lossy wire between
//! them, and keeps per-side frame counters for oracles.

use q921_core::{ConfigError, Role, TrunkConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sim::{SimClock, SimInbox, SimTrunk, SimWire};

/// Upper bound on exchange rounds in one [`World::pump`].
const MAX_ROUNDS: usize = 64;

/// Wire events recorded during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkEvent {
    /// Loss rate changed
    PacketLoss {
        /// Probability of dropping each frame
        rate: f64,
    },
    /// A frame was dropped on its way to `to`
    Dropped {
        /// Receiving side
        to: Role,
        /// Frame length
        len: usize,
    },
    /// Receiver's queue had no room
    QueueFull {
        /// Receiving side
        to: Role,
    },
}

/// Two trunks wired back to back.
pub struct World {
    clock: SimClock,
    network: SimTrunk,
    user: SimTrunk,
    rng: ChaCha8Rng,
    loss_rate: f64,
    frames_received: [usize; 2],
    network_events: Vec<NetworkEvent>,
}

impl World {
    /// Build both trunks with the given configurations.
    ///
    /// The `role` field of each configuration is overridden so that the
    /// sides always match their slot.
    pub fn new(network: TrunkConfig, user: TrunkConfig, seed: u64) -> Result<Self, ConfigError> {
        let clock = SimClock::default();
        let network = SimTrunk::new(
            TrunkConfig { role: Role::Network, ..network },
            SimWire::default(),
            SimInbox::default(),
        )?
        .with_clock(clock.clone());
        let user = SimTrunk::new(
            TrunkConfig { role: Role::User, ..user },
            SimWire::default(),
            SimInbox::default(),
        )?
        .with_clock(clock.clone());

        Ok(Self {
            clock,
            network,
            user,
            rng: ChaCha8Rng::seed_from_u64(seed),
            loss_rate: 0.0,
            frames_received: [0; 2],
            network_events: Vec::new(),
        })
    }

    /// Shared clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Trunk on the given side.
    pub fn trunk(&self, role: Role) -> &SimTrunk {
        match role {
            Role::Network => &self.network,
            Role::User => &self.user,
        }
    }

    /// Trunk on the given side, mutably.
    pub fn trunk_mut(&mut self, role: Role) -> &mut SimTrunk {
        match role {
            Role::Network => &mut self.network,
            Role::User => &mut self.user,
        }
    }

    /// Drop each frame with probability `rate` from now on.
    pub fn set_loss_rate(&mut self, rate: f64) {
        self.loss_rate = rate.clamp(0.0, 1.0);
        self.network_events.push(NetworkEvent::PacketLoss { rate: self.loss_rate });
    }

    /// Frames transmitted by one side.
    pub fn frames_sent(&self, role: Role) -> usize {
        self.trunk(role).layer1().transmitted()
    }

    /// Frames that reached one side's receive queue.
    pub fn frames_received(&self, role: Role) -> usize {
        self.frames_received[Self::index(role)]
    }

    /// Frames dropped by the lossy wire.
    pub fn frames_lost(&self) -> usize {
        self.network_events.iter().filter(|event| matches!(event, NetworkEvent::Dropped { .. })).count()
    }

    /// Wire events so far.
    pub fn network_events(&self) -> &[NetworkEvent] {
        &self.network_events
    }

    /// Whether each side's V(S) matches the other side's V(R) and nothing
    /// is left unacknowledged.
    pub fn in_sync(&self) -> bool {
        let network = self.network.link();
        let user = self.user.link();
        network.vs() == user.vr()
            && user.vs() == network.vr()
            && network.outstanding() == 0
            && user.outstanding() == 0
    }

    /// Move frames across the wire and process them until both sides are
    /// quiet. Returns the number of frames that reached a receive queue.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;

        for _ in 0..MAX_ROUNDS {
            let to_user = self.network.layer1_mut().take();
            let to_network = self.user.layer1_mut().take();
            if to_user.is_empty() && to_network.is_empty() {
                break;
            }

            delivered += self.carry(Role::User, &to_user);
            delivered += self.carry(Role::Network, &to_network);

            self.network.drain();
            self.user.drain();
        }

        delivered
    }

    /// Advance time by `ms`, run both trunks' timers, then pump.
    pub fn advance(&mut self, ms: u64) -> usize {
        self.clock.advance(ms);
        self.network.timer_tick();
        self.user.timer_tick();
        self.pump()
    }

    fn carry(&mut self, to: Role, frames: &[bytes::Bytes]) -> usize {
        let mut carried = 0;

        for frame in frames {
            if self.loss_rate > 0.0 && self.rng.gen_bool(self.loss_rate) {
                tracing::debug!(?to, len = frame.len(), "wire dropped frame");
                self.network_events.push(NetworkEvent::Dropped { to, len: frame.len() });
                continue;
            }

            if self.trunk_mut(to).queue_frame(frame).is_err() {
                self.network_events.push(NetworkEvent::QueueFull { to });
                continue;
            }
            self.frames_received[Self::index(to)] += 1;
            carried += 1;
        }

        carried
    }

    const fn index(role: Role) -> usize {
        match role {
            Role::Network => 0,
            Role::User => 1,
        }
    }
}
