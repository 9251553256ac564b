//! CLI error type.

use thiserror::Error;

/// Anything that makes a subcommand fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Frame argument is not valid hex
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Frame shorter than the header reservation
    #[error("frame of {len} bytes is shorter than the {header_space}-byte reservation")]
    ShorterThanReservation {
        /// Frame length
        len: usize,
        /// Requested reservation
        header_space: usize,
    },

    /// Frame could not be decoded
    #[error("cannot decode frame: {0}")]
    Frame(#[from] q921_proto::FrameError),

    /// Loss rate outside 0.0..=1.0
    #[error("loss rate {0} is not a probability")]
    InvalidLoss(f64),

    /// Simulation setup or step failed
    #[error("simulation failed: {0}")]
    Simulation(String),

    /// Writing output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
