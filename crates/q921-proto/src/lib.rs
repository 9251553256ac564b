//! Wire format for Q.921 (LAPD) data-link frames.
//!
//! A LAPD frame as seen by this crate is the byte run that follows whatever
//! prefix the lower layer reserves for itself:
//!
//! ```text
//! ┌───────────────┬──────────────────┬─────────────────┬─────────┐
//! │ Address (2)   │ Control (1 or 2) │ Information (n) │ FCS (2) │
//! └───────────────┴──────────────────┴─────────────────┴─────────┘
//! ```
//!
//! The address field carries SAPI, the C/R bit and TEI. The control field is
//! two octets for I- and S-frames (modulo-128 sequence numbers) and one octet
//! for U-frames. The FCS placeholder is only present on I-frames and is owned
//! by the HDLC hardware; nothing here computes or checks it.
//!
//! Parsing is borrow-based: [`Frame::parse`] hands out a view whose
//! information field points into the caller's buffer, so the receive path
//! never copies a frame it is only going to classify.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod control;
pub mod errors;
pub mod frame;
pub mod header;
pub mod seq;

pub use address::Address;
pub use control::{Control, SupervisoryKind, UnnumberedKind};
pub use errors::{FrameError, Result};
pub use frame::{Frame, FrameKind};
pub use header::Header;
pub use seq::Seq;
