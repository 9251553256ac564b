//! Borrowed frame view and classification.
//!
//! [`Frame`] is the receive-side view of one LAPD frame: decoded header plus
//! a slice of the information field. For I-frames the two trailing FCS
//! placeholder octets are excluded from `info`; S- and U-frames carry no
//! placeholder.

use std::fmt;

use crate::{
    control::{Control, SupervisoryKind, UnnumberedKind},
    errors::Result,
    header::Header,
};

/// Frame classification used for dispatch and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum FrameKind {
    /// Information
    I,
    /// Receive Ready
    RR,
    /// Receive Not Ready
    RNR,
    /// Reject
    REJ,
    /// Set Asynchronous Balanced Mode Extended
    SABME,
    /// Disconnected Mode
    DM,
    /// Disconnect
    DISC,
    /// Unnumbered Acknowledgement
    UA,
    /// Unnumbered Information
    UI,
    /// Frame Reject
    FRMR,
    /// Exchange Identification
    XID,
}

impl FrameKind {
    /// Short mnemonic as used in Q.921.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::RR => "RR",
            Self::RNR => "RNR",
            Self::REJ => "REJ",
            Self::SABME => "SABME",
            Self::DM => "DM",
            Self::DISC => "DISC",
            Self::UA => "UA",
            Self::UI => "UI",
            Self::FRMR => "FRMR",
            Self::XID => "XID",
        }
    }
}

impl From<&Control> for FrameKind {
    fn from(control: &Control) -> Self {
        match control {
            Control::Information { .. } => Self::I,
            Control::Supervisory { kind, .. } => match kind {
                SupervisoryKind::Rr => Self::RR,
                SupervisoryKind::Rnr => Self::RNR,
                SupervisoryKind::Rej => Self::REJ,
            },
            Control::Unnumbered { kind, .. } => match kind {
                UnnumberedKind::Sabme => Self::SABME,
                UnnumberedKind::Dm => Self::DM,
                UnnumberedKind::Disc => Self::DISC,
                UnnumberedKind::Ua => Self::UA,
                UnnumberedKind::Ui => Self::UI,
                UnnumberedKind::Frmr => Self::FRMR,
                UnnumberedKind::Xid => Self::XID,
            },
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed frame borrowing its information field from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Address and control fields
    pub header: Header,
    /// Information field (FCS placeholder stripped on I-frames)
    pub info: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Trailing octets reserved on I-frames for the lower layer's FCS.
    pub const FCS_LEN: usize = 2;

    /// Parse a frame starting at its address field.
    ///
    /// `bytes` must already have any lower-layer reservation removed.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let header = Header::decode(bytes)?;
        let start = header.wire_len();

        let end = match header.control {
            Control::Information { .. } => bytes.len().saturating_sub(Self::FCS_LEN).max(start),
            Control::Supervisory { .. } | Control::Unnumbered { .. } => bytes.len(),
        };

        Ok(Self { header, info: &bytes[start..end] })
    }

    /// Frame classification.
    pub fn kind(&self) -> FrameKind {
        FrameKind::from(&self.header.control)
    }
}

impl fmt::Display for Frame<'_> {
    /// One-line summary; the alternate form (`{:#}`) adds a hex dump of the
    /// information field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = &self.header.address;
        write!(
            f,
            "{} sapi={} tei={} c/r={}",
            self.kind(),
            address.sapi,
            address.tei,
            u8::from(address.cr)
        )?;

        match self.header.control {
            Control::Information { ns, nr, poll } => {
                write!(f, " n(s)={ns} n(r)={nr} p={}", u8::from(poll))?;
            },
            Control::Supervisory { nr, poll_final, .. } => {
                write!(f, " n(r)={nr} p/f={}", u8::from(poll_final))?;
            },
            Control::Unnumbered { poll_final, .. } => {
                write!(f, " p/f={}", u8::from(poll_final))?;
            },
        }

        if !self.info.is_empty() {
            write!(f, " len={}", self.info.len())?;
            if f.alternate() {
                write!(f, "\n  info: {}", hex::encode(self.info))?;
            }
        }

        Ok(())
    }
}
