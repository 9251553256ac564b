//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use q921_core::Role;

/// q921 - inspect and exercise the Q.921 (LAPD) data-link engine
#[derive(Debug, Parser)]
#[command(name = "q921")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output (every frame is traced)
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a hex-encoded frame
    Decode {
        /// Frame bytes as hex (whitespace allowed)
        frame: Vec<String>,

        /// Bytes reserved before the LAPD header
        #[arg(long, default_value_t = 0)]
        header_space: usize,
    },

    /// Run two trunks back to back and report the outcome
    Simulate {
        /// I-frames sent by the network side
        #[arg(long, default_value_t = 8)]
        frames: usize,

        /// I-frames sent by the user side
        #[arg(long, default_value_t = 0)]
        replies: usize,

        /// Probability of losing each frame on the wire
        #[arg(long, default_value_t = 0.0)]
        loss: f64,

        /// RNG seed for frame loss
        #[arg(long, default_value_t = 0, env = "Q921_SEED")]
        seed: u64,

        /// Idle time to let pass at the end, in milliseconds
        #[arg(long, default_value_t = 0)]
        idle_ms: u64,

        /// Side that sends SABME first
        #[arg(long, value_enum, default_value_t = Side::Network)]
        start: Side,
    },
}

/// Side of the user-network interface, as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Network termination
    Network,
    /// Terminal equipment
    User,
}

impl From<Side> for Role {
    fn from(side: Side) -> Self {
        match side {
            Side::Network => Self::Network,
            Side::User => Self::User,
        }
    }
}
