//! LAPD address field (octets 1 and 2).
//!
//! ```text
//!   8   7   6   5   4   3   2   1
//! ┌───────────────────────┬───┬───┐
//! │         SAPI          │C/R│ 0 │  octet 1
//! ├───────────────────────────┴───┤
//! │            TEI            │ 1 │  octet 2
//! └───────────────────────────┴───┘
//! ```
//!
//! Bit 1 of each octet is the address extension bit. Decoding masks the
//! subfields and does not reject frames with odd extension bits; the HDLC
//! layer below is trusted to deliver whole frames.

use crate::errors::{FrameError, Result};

/// Decoded address field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Service Access Point Identifier (6 bits)
    pub sapi: u8,
    /// Command/Response bit as it appears on the wire
    pub cr: bool,
    /// Terminal Endpoint Identifier (7 bits)
    pub tei: u8,
}

impl Address {
    /// Encoded size in bytes.
    pub const SIZE: usize = 2;

    /// Largest SAPI value.
    pub const MAX_SAPI: u8 = 63;

    /// Largest TEI value.
    pub const MAX_TEI: u8 = 127;

    /// SAPI used for call-control (Q.931) signalling.
    pub const SAPI_CALL_CONTROL: u8 = 0;

    /// Create an address, rejecting out-of-range SAPI or TEI values.
    pub fn new(sapi: u8, cr: bool, tei: u8) -> Result<Self> {
        if sapi > Self::MAX_SAPI {
            return Err(FrameError::SapiOutOfRange(sapi));
        }
        if tei > Self::MAX_TEI {
            return Err(FrameError::TeiOutOfRange(tei));
        }
        Ok(Self { sapi, cr, tei })
    }

    /// Encode into the two address octets.
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        [((self.sapi << 2) & 0xfc) | (u8::from(self.cr) << 1), (self.tei << 1) | 0x01]
    }

    /// Decode the two address octets.
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self { sapi: (bytes[0] & 0xfc) >> 2, cr: bytes[0] & 0x02 != 0, tei: (bytes[1] & 0xfe) >> 1 }
    }

    /// Decode the address field at the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [a, b, ..] => Ok(Self::from_bytes([*a, *b])),
            _ => Err(FrameError::Truncated { needed: Self::SIZE, actual: bytes.len() }),
        }
    }
}
