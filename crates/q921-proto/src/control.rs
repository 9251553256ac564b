//! LAPD control field.
//!
//! | Frame | Octet 3               | Octet 4           |
//! |-------|-----------------------|-------------------|
//! | I     | `N(S) << 1`           | `N(R) << 1 \| P`  |
//! | RR    | `0x01`                | `N(R) << 1 \| P/F`|
//! | RNR   | `0x05`                | `N(R) << 1 \| P/F`|
//! | REJ   | `0x09`                | `N(R) << 1 \| P/F`|
//! | SABME | `0x6F \| P << 4`      | -                 |
//! | DM    | `0x0F \| F << 4`      | -                 |
//! | DISC  | `0x43 \| P << 4`      | -                 |
//! | UA    | `0x63 \| F << 4`      | -                 |
//! | UI    | `0x03 \| P << 4`      | -                 |
//! | FRMR  | `0x87 \| F << 4`      | -                 |
//! | XID   | `0xAF \| P/F << 4`    | -                 |

use crate::{
    errors::{FrameError, Result},
    seq::Seq,
};

/// P/F bit position in a U-frame control octet.
const U_PF_BIT: u8 = 0x10;

/// Supervisory function of an S-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupervisoryKind {
    /// Receive Ready
    Rr,
    /// Receive Not Ready
    Rnr,
    /// Reject
    Rej,
}

impl SupervisoryKind {
    /// Control octet 3 for this supervisory function.
    pub const fn code(self) -> u8 {
        match self {
            Self::Rr => 0x01,
            Self::Rnr => 0x05,
            Self::Rej => 0x09,
        }
    }

    /// Decode control octet 3 of an S-frame.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Rr),
            0x05 => Some(Self::Rnr),
            0x09 => Some(Self::Rej),
            _ => None,
        }
    }
}

/// Modifier function of a U-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnnumberedKind {
    /// Set Asynchronous Balanced Mode Extended
    Sabme,
    /// Disconnected Mode
    Dm,
    /// Disconnect
    Disc,
    /// Unnumbered Acknowledgement
    Ua,
    /// Unnumbered Information
    Ui,
    /// Frame Reject
    Frmr,
    /// Exchange Identification
    Xid,
}

impl UnnumberedKind {
    /// Control octet with the P/F bit cleared.
    pub const fn code(self) -> u8 {
        match self {
            Self::Sabme => 0x6f,
            Self::Dm => 0x0f,
            Self::Disc => 0x43,
            Self::Ua => 0x63,
            Self::Ui => 0x03,
            Self::Frmr => 0x87,
            Self::Xid => 0xaf,
        }
    }

    /// Decode a control octet, ignoring the P/F bit.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code & !U_PF_BIT {
            0x6f => Some(Self::Sabme),
            0x0f => Some(Self::Dm),
            0x43 => Some(Self::Disc),
            0x63 => Some(Self::Ua),
            0x03 => Some(Self::Ui),
            0x87 => Some(Self::Frmr),
            0xaf => Some(Self::Xid),
            _ => None,
        }
    }
}

/// Decoded control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Information transfer
    Information {
        /// Send sequence number N(S)
        ns: Seq,
        /// Receive sequence number N(R)
        nr: Seq,
        /// Poll bit
        poll: bool,
    },

    /// Supervisory
    Supervisory {
        /// Supervisory function
        kind: SupervisoryKind,
        /// Receive sequence number N(R)
        nr: Seq,
        /// Poll (command) or Final (response) bit
        poll_final: bool,
    },

    /// Unnumbered
    Unnumbered {
        /// Modifier function
        kind: UnnumberedKind,
        /// Poll (command) or Final (response) bit
        poll_final: bool,
    },
}

impl Control {
    /// Encoded size: two octets for I/S-frames, one for U-frames.
    pub const fn wire_len(&self) -> usize {
        match self {
            Self::Information { .. } | Self::Supervisory { .. } => 2,
            Self::Unnumbered { .. } => 1,
        }
    }

    /// P/F bit regardless of frame class.
    pub const fn poll_final(&self) -> bool {
        match *self {
            Self::Information { poll, .. } => poll,
            Self::Supervisory { poll_final, .. } | Self::Unnumbered { poll_final, .. } => {
                poll_final
            },
        }
    }

    /// N(R) carried by I- and S-frames.
    pub const fn nr(&self) -> Option<Seq> {
        match *self {
            Self::Information { nr, .. } | Self::Supervisory { nr, .. } => Some(nr),
            Self::Unnumbered { .. } => None,
        }
    }

    /// Encode into the start of `out`, returning the bytes written.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        let needed = self.wire_len();
        if out.len() < needed {
            return Err(FrameError::BufferTooSmall { needed, actual: out.len() });
        }

        match *self {
            Self::Information { ns, nr, poll } => {
                out[0] = ns.value() << 1;
                out[1] = (nr.value() << 1) | u8::from(poll);
            },
            Self::Supervisory { kind, nr, poll_final } => {
                out[0] = kind.code();
                out[1] = (nr.value() << 1) | u8::from(poll_final);
            },
            Self::Unnumbered { kind, poll_final } => {
                out[0] = kind.code() | if poll_final { U_PF_BIT } else { 0 };
            },
        }

        Ok(needed)
    }

    /// Decode the control field at the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some(&first) = bytes.first() else {
            return Err(FrameError::Truncated { needed: 1, actual: 0 });
        };

        if first & 0x01 == 0x00 {
            let second = second_octet(bytes)?;
            return Ok(Self::Information {
                ns: Seq::new(first >> 1),
                nr: Seq::new(second >> 1),
                poll: second & 0x01 != 0,
            });
        }

        if first & 0x03 == 0x01 {
            let kind = SupervisoryKind::from_code(first)
                .ok_or(FrameError::UnknownSupervisory(first))?;
            let second = second_octet(bytes)?;
            return Ok(Self::Supervisory {
                kind,
                nr: Seq::new(second >> 1),
                poll_final: second & 0x01 != 0,
            });
        }

        let kind = UnnumberedKind::from_code(first).ok_or(FrameError::UnknownUnnumbered(first))?;
        Ok(Self::Unnumbered { kind, poll_final: first & U_PF_BIT != 0 })
    }
}

fn second_octet(bytes: &[u8]) -> Result<u8> {
    bytes.get(1).copied().ok_or(FrameError::Truncated { needed: 2, actual: bytes.len() })
}
