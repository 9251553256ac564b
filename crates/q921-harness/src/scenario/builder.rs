//! Scenario builder API.
//!
//! Provides a declarative API for scripting a two-trunk run that cannot be
//! executed without an oracle.

use bytes::Bytes;
use q921_core::{Role, TrunkConfig};

use crate::scenario::{OracleFn, World};

/// One scripted action. Every action is followed by a pump.
#[derive(Debug, Clone)]
enum Step {
    Start(Role),
    SendI { from: Role, payload: Bytes, poll: bool },
    Advance(u64),
    Loss(f64),
}

/// Scenario builder.
///
/// Configure both sides, script the steps, then call `.oracle()` to get a
/// [`RunnableScenario`].
pub struct Scenario {
    name: String,
    network: TrunkConfig,
    user: TrunkConfig,
    seed: u64,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with default trunk settings and seed 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            network: TrunkConfig::default(),
            user: TrunkConfig::default(),
            seed: 0,
            steps: Vec::new(),
        }
    }

    /// Settings for the network-side trunk.
    pub fn network_config(mut self, config: TrunkConfig) -> Self {
        self.network = config;
        self
    }

    /// Settings for the user-side trunk.
    pub fn user_config(mut self, config: TrunkConfig) -> Self {
        self.user = config;
        self
    }

    /// Seed for the loss RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Drop frames with probability `rate` from this point on.
    pub fn loss(mut self, rate: f64) -> Self {
        self.steps.push(Step::Loss(rate));
        self
    }

    /// `role` sends SABME.
    pub fn start(mut self, role: Role) -> Self {
        self.steps.push(Step::Start(role));
        self
    }

    /// `from` sends an I-frame with P=0.
    pub fn send(mut self, from: Role, payload: impl Into<Bytes>) -> Self {
        self.steps.push(Step::SendI { from, payload: payload.into(), poll: false });
        self
    }

    /// `from` sends an I-frame with P=1.
    pub fn send_poll(mut self, from: Role, payload: impl Into<Bytes>) -> Self {
        self.steps.push(Step::SendI { from, payload: payload.into(), poll: true });
        self
    }

    /// Let `ms` milliseconds pass.
    pub fn advance(mut self, ms: u64) -> Self {
        self.steps.push(Step::Advance(ms));
        self
    }

    /// Set the oracle function and return a runnable scenario.
    ///
    /// The oracle is mandatory - you cannot run a scenario without
    /// verification.
    pub fn oracle(self, oracle: OracleFn) -> RunnableScenario {
        RunnableScenario { scenario: self, oracle }
    }
}

/// A scenario with an oracle function that can be executed.
pub struct RunnableScenario {
    scenario: Scenario,
    oracle: OracleFn,
}

impl RunnableScenario {
    /// Execute the scripted steps, then run the oracle on the final world.
    pub fn run(self) -> Result<(), String> {
        let world = self.execute()?;
        (self.oracle)(&world)
    }

    /// Like [`run`](Self::run), but hand back the world once the oracle
    /// passes.
    pub fn run_into_world(self) -> Result<World, String> {
        let world = self.execute()?;
        (self.oracle)(&world)?;
        Ok(world)
    }

    fn execute(&self) -> Result<World, String> {
        let name = &self.scenario.name;
        let _span = tracing::info_span!("scenario", %name).entered();

        let mut world =
            World::new(self.scenario.network.clone(), self.scenario.user.clone(), self.scenario.seed)
                .map_err(|e| format!("Scenario '{name}': invalid trunk config: {e}"))?;

        for step in &self.scenario.steps {
            tracing::debug!(?step, now = world.clock().now(), "step");
            match step {
                Step::Start(role) => {
                    world
                        .trunk_mut(*role)
                        .start()
                        .map_err(|e| format!("Scenario '{name}': {role:?} start failed: {e}"))?;
                },
                Step::SendI { from, payload, poll } => {
                    world
                        .trunk_mut(*from)
                        .send_i(payload, *poll)
                        .map_err(|e| format!("Scenario '{name}': {from:?} send_i failed: {e}"))?;
                },
                Step::Advance(ms) => {
                    world.advance(*ms);
                    continue;
                },
                Step::Loss(rate) => {
                    world.set_loss_rate(*rate);
                    continue;
                },
            }
            world.pump();
        }

        Ok(world)
    }
}
