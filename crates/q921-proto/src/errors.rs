//! Error types for frame encoding and decoding.

use thiserror::Error;

/// Result type alias for wire-format operations.
pub type Result<T> = core::result::Result<T, FrameError>;

/// Errors raised while building or parsing LAPD frames.
///
/// None of these are fatal to a link. The receive path treats every one of
/// them as "unclassifiable frame" and drops the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Input ended before the fields the frame type requires.
    #[error("frame truncated: need {needed} bytes, got {actual}")]
    Truncated {
        /// Bytes required to decode the frame
        needed: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Output buffer cannot hold the encoded header.
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall {
        /// Bytes required to encode the frame
        needed: usize,
        /// Bytes available in the output buffer
        actual: usize,
    },

    /// SAPI does not fit the 6-bit address subfield.
    #[error("SAPI {0} out of range (max {max})", max = crate::Address::MAX_SAPI)]
    SapiOutOfRange(u8),

    /// TEI does not fit the 7-bit address subfield.
    #[error("TEI {0} out of range (max {max})", max = crate::Address::MAX_TEI)]
    TeiOutOfRange(u8),

    /// S-frame control octet with an undefined supervisory function.
    #[error("unknown supervisory control field {0:#04x}")]
    UnknownSupervisory(u8),

    /// U-frame control octet with an undefined modifier function.
    #[error("unknown unnumbered control field {0:#04x}")]
    UnknownUnnumbered(u8),
}
