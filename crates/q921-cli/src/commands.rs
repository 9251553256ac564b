//! Subcommand implementations.
//!
//! Output goes to the writer passed in so commands can be exercised without
//! a terminal.

use std::io::Write;

use q921_core::{Role, TrunkConfig};
use q921_harness::World;
use q921_proto::Frame;

use crate::error::{CliError, CliResult};

/// Parameters of the `simulate` subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    /// I-frames sent by the network side
    pub frames: usize,
    /// I-frames sent by the user side
    pub replies: usize,
    /// Per-frame loss probability
    pub loss: f64,
    /// Loss RNG seed
    pub seed: u64,
    /// Idle time at the end, in milliseconds
    pub idle_ms: u64,
    /// Side sending SABME
    pub start: Role,
}

/// Decode one frame given as hex and print it.
pub fn decode(parts: &[String], header_space: usize, out: &mut impl Write) -> CliResult<()> {
    let hex: String = parts.concat().chars().filter(|c| !c.is_whitespace()).collect();
    let raw = hex::decode(hex)?;

    let bytes = raw.get(header_space..).ok_or(CliError::ShorterThanReservation {
        len: raw.len(),
        header_space,
    })?;
    let frame = Frame::parse(bytes)?;
    tracing::debug!(len = raw.len(), header_space, "decoded frame");

    writeln!(out, "{frame:#}")?;
    Ok(())
}

/// Run a loopback simulation and print per-side counters.
pub fn simulate(args: &SimulateArgs, out: &mut impl Write) -> CliResult<()> {
    if !(0.0..=1.0).contains(&args.loss) {
        return Err(CliError::InvalidLoss(args.loss));
    }

    let mut world = World::new(TrunkConfig::default(), TrunkConfig::default(), args.seed)
        .map_err(|e| CliError::Simulation(e.to_string()))?;
    if args.loss > 0.0 {
        world.set_loss_rate(args.loss);
    }

    world
        .trunk_mut(args.start)
        .start()
        .map_err(|e| CliError::Simulation(e.to_string()))?;
    world.pump();

    let sends = std::iter::repeat_n(Role::Network, args.frames)
        .enumerate()
        .chain(std::iter::repeat_n(Role::User, args.replies).enumerate());
    for (index, from) in sends {
        let payload = format!("{from:?} #{index}").into_bytes();
        world
            .trunk_mut(from)
            .send_i(&payload, false)
            .map_err(|e| CliError::Simulation(e.to_string()))?;
        world.pump();
    }

    if args.idle_ms > 0 {
        world.advance(args.idle_ms);
    }

    tracing::info!(lost = world.frames_lost(), in_sync = world.in_sync(), "simulation finished");

    for role in [Role::Network, Role::User] {
        let trunk = world.trunk(role);
        let link = trunk.link();
        writeln!(
            out,
            "{role:?}: sent={} received={} delivered={} V(S)={} V(R)={} V(A)={}",
            world.frames_sent(role),
            world.frames_received(role),
            trunk.layer3().delivered().len(),
            link.vs(),
            link.vr(),
            link.va(),
        )?;
    }
    writeln!(out, "lost={} in_sync={}", world.frames_lost(), world.in_sync())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> String {
        let mut out = Vec::new();
        result(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn decodes_spaced_hex() {
        let parts = vec!["02 01".to_string(), "7f".to_string()];
        let text = render(|out| decode(&parts, 0, out));
        assert_eq!(text, "SABME sapi=0 tei=0 c/r=1 p/f=1\n");
    }

    #[test]
    fn decode_skips_reservation() {
        let parts = vec!["ffff02010101".to_string()];
        let text = render(|out| decode(&parts, 2, out));
        assert!(text.starts_with("RR "), "{text}");
    }

    #[test]
    fn decode_rejects_short_input() {
        let parts = vec!["02".to_string()];
        let mut out = Vec::new();
        assert!(matches!(decode(&parts, 2, &mut out), Err(CliError::ShorterThanReservation { .. })));
        assert!(matches!(decode(&parts, 0, &mut out), Err(CliError::Frame(_))));
    }

    #[test]
    fn lossless_simulation_ends_in_sync() {
        let args = SimulateArgs {
            frames: 3,
            replies: 2,
            loss: 0.0,
            seed: 1,
            idle_ms: 0,
            start: Role::Network,
        };
        let text = render(|out| simulate(&args, out));

        assert!(text.contains("Network: sent=6 received=6 delivered=2 V(S)=3 V(R)=2 V(A)=3"), "{text}");
        assert!(text.contains("User: sent=6 received=6 delivered=3 V(S)=2 V(R)=3 V(A)=2"), "{text}");
        assert!(text.ends_with("lost=0 in_sync=true\n"), "{text}");
    }

    #[test]
    fn rejects_bad_loss_rate() {
        let args = SimulateArgs {
            frames: 1,
            replies: 0,
            loss: 1.5,
            seed: 0,
            idle_ms: 0,
            start: Role::User,
        };
        let mut out = Vec::new();
        assert!(matches!(simulate(&args, &mut out), Err(CliError::InvalidLoss(_))));
    }
}
