//! LAPD header: address field followed by control field.

use crate::{
    address::Address,
    control::{Control, SupervisoryKind, UnnumberedKind},
    errors::{FrameError, Result},
    seq::Seq,
};

/// Address and control fields of one frame (3 or 4 bytes on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Address field
    pub address: Address,
    /// Control field
    pub control: Control,
}

impl Header {
    /// Largest encoded header (I- and S-frames).
    pub const MAX_SIZE: usize = 4;

    /// Header for an I-frame.
    pub const fn information(address: Address, ns: Seq, nr: Seq, poll: bool) -> Self {
        Self { address, control: Control::Information { ns, nr, poll } }
    }

    /// Header for an S-frame.
    pub const fn supervisory(
        address: Address,
        kind: SupervisoryKind,
        nr: Seq,
        poll_final: bool,
    ) -> Self {
        Self { address, control: Control::Supervisory { kind, nr, poll_final } }
    }

    /// Header for a U-frame.
    pub const fn unnumbered(address: Address, kind: UnnumberedKind, poll_final: bool) -> Self {
        Self { address, control: Control::Unnumbered { kind, poll_final } }
    }

    /// Encoded size in bytes.
    pub const fn wire_len(&self) -> usize {
        Address::SIZE + self.control.wire_len()
    }

    /// Encode into the start of `out`, returning the bytes written.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize> {
        let needed = self.wire_len();
        if out.len() < needed {
            return Err(FrameError::BufferTooSmall { needed, actual: out.len() });
        }

        out[..Address::SIZE].copy_from_slice(&self.address.to_bytes());
        let control_len = self.control.encode_into(&mut out[Address::SIZE..])?;

        Ok(Address::SIZE + control_len)
    }

    /// Decode the header at the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let address = Address::decode(bytes)?;
        let control = Control::decode(&bytes[Address::SIZE..]).map_err(|err| match err {
            FrameError::Truncated { needed, actual } => FrameError::Truncated {
                needed: needed + Address::SIZE,
                actual: actual + Address::SIZE,
            },
            other => other,
        })?;

        Ok(Self { address, control })
    }
}
