//! Error types for the data-link engine.
//!
//! Protocol anomalies (full queue, malformed frame) are ordinary return
//! values. None of these errors indicate a broken trunk; the caller decides
//! whether a lost frame matters.

use q921_proto::FrameError;
use thiserror::Error;

/// Frame queue failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A queue needs at least two slots (one is always kept empty).
    #[error("queue needs at least 2 slots, got {0}")]
    InvalidSlotCount(usize),

    /// Backing buffer cannot hold the slot index plus any payload.
    #[error("queue buffer too small: need more than {needed} bytes, got {actual}")]
    BufferTooSmall {
        /// Bytes taken by the slot index
        needed: usize,
        /// Size of the supplied buffer
        actual: usize,
    },

    /// Backing buffer exceeds what 32-bit slot offsets can address.
    #[error("queue buffer of {0} bytes exceeds 32-bit slot offsets")]
    BufferTooLarge(usize),

    /// Zero-length messages are not stored.
    #[error("cannot queue an empty message")]
    EmptyMessage,

    /// Message is larger than the whole payload area.
    #[error("message of {len} bytes exceeds queue capacity of {capacity} bytes")]
    MessageTooLarge {
        /// Message length
        len: usize,
        /// Payload area size
        capacity: usize,
    },

    /// All usable slots are occupied.
    #[error("all {0} usable queue slots occupied")]
    SlotsExhausted(usize),

    /// Free space exists but not as one contiguous run.
    #[error("no contiguous run of {0} free bytes")]
    NoContiguousSpace(usize),
}

/// Trunk configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// SAPI does not fit in 6 bits.
    #[error("SAPI {0} out of range")]
    SapiOutOfRange(u8),

    /// TEI does not fit in 7 bits.
    #[error("TEI {0} out of range")]
    TeiOutOfRange(u8),

    /// Header reservation larger than the engine supports.
    #[error("header space of {actual} bytes exceeds maximum of {max}")]
    HeaderSpaceTooLarge {
        /// Configured reservation
        actual: usize,
        /// Supported maximum
        max: usize,
    },

    /// A timer with zero duration would expire on every tick.
    #[error("timer {0} must have a non-zero duration")]
    ZeroTimer(&'static str),

    /// Receive queue geometry is unusable.
    #[error("invalid receive queue: {0}")]
    Queue(#[from] QueueError),
}

/// Errors returned by the frame builders.
#[derive(Debug, Error)]
pub enum TrunkError<E: std::error::Error + 'static> {
    /// Layer 1 refused the frame.
    #[error("layer 1 transmit failed")]
    Transmit(#[source] E),

    /// Information field longer than N201.
    #[error("information field of {len} bytes exceeds N201 ({max})")]
    PayloadTooLong {
        /// Payload length
        len: usize,
        /// Configured N201
        max: usize,
    },

    /// Header could not be encoded.
    #[error(transparent)]
    Frame(#[from] FrameError),
}
