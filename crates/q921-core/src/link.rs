//! Per-trunk link state: addressing, role, and the V(S)/V(R)/V(A) counters.
//!
//! There is no link-establishment state machine. Link state is entirely the
//! three counters; SABME resets them but does not gate I-frame acceptance.

use q921_proto::{Address, Seq};
use serde::{Deserialize, Serialize};

/// Which side of the user-network interface this trunk sits on.
///
/// The role fixes the C/R bit values: the network side sends commands with
/// C/R=1 and responses with C/R=0, the user side the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Network termination (NT)
    Network,
    /// Terminal equipment (TE)
    #[default]
    User,
}

/// Whether a frame is sent as a command or as a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandResponse {
    /// Command frame
    Command,
    /// Response frame
    Response,
}

impl Role {
    /// C/R bit this side puts on frames of the given direction.
    pub const fn cr_bit(self, direction: CommandResponse) -> bool {
        let command = matches!(self, Self::Network);
        match direction {
            CommandResponse::Command => command,
            CommandResponse::Response => !command,
        }
    }

    /// Whether a received C/R bit marks a command from the peer.
    pub const fn is_peer_command(self, cr: bool) -> bool {
        // The peer has the opposite role, so its commands carry our
        // response value.
        cr == self.cr_bit(CommandResponse::Response)
    }
}

/// Addressing plus sequence counters for one trunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    sapi: u8,
    tei: u8,
    role: Role,
    vs: Seq,
    vr: Seq,
    va: Seq,
}

impl LinkState {
    /// Fresh link with all counters at zero.
    ///
    /// `sapi` and `tei` are masked to their field widths; validation happens
    /// when the trunk configuration is checked.
    pub fn new(sapi: u8, tei: u8, role: Role) -> Self {
        Self {
            sapi: sapi & Address::MAX_SAPI,
            tei: tei & Address::MAX_TEI,
            role,
            vs: Seq::ZERO,
            vr: Seq::ZERO,
            va: Seq::ZERO,
        }
    }

    /// Service Access Point Identifier.
    pub fn sapi(&self) -> u8 {
        self.sapi
    }

    /// Terminal Endpoint Identifier.
    pub fn tei(&self) -> u8 {
        self.tei
    }

    /// Network or user side.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Send state variable V(S).
    pub fn vs(&self) -> Seq {
        self.vs
    }

    /// Receive state variable V(R).
    pub fn vr(&self) -> Seq {
        self.vr
    }

    /// Acknowledge state variable V(A).
    pub fn va(&self) -> Seq {
        self.va
    }

    /// I-frames sent but not yet acknowledged.
    pub fn outstanding(&self) -> u8 {
        self.vs.distance_from(self.va)
    }

    /// Address field for an outgoing frame.
    pub fn address(&self, direction: CommandResponse) -> Address {
        Address { sapi: self.sapi, cr: self.role.cr_bit(direction), tei: self.tei }
    }

    /// V(S) = V(S) + 1 after an I-frame went out.
    ///
    /// No window limit is enforced.
    pub fn advance_send(&mut self) -> Seq {
        self.vs = self.vs.next();
        self.vs
    }

    /// Apply a received N(R).
    ///
    /// Accepted only if `V(A) <= N(R) <= V(S)` in circular order, so V(A)
    /// never moves backwards. Returns whether V(A) was updated.
    pub fn receive_ack(&mut self, nr: Seq) -> bool {
        if !nr.is_between(self.va, self.vs) {
            return false;
        }
        self.va = nr;
        true
    }

    /// V(R) = V(R) + 1 for a received I-frame.
    pub fn receive_i_frame(&mut self) -> Seq {
        self.vr = self.vr.next();
        self.vr
    }

    /// Reset all counters (SABME received).
    pub fn reset(&mut self) {
        self.vs = Seq::ZERO;
        self.vr = Seq::ZERO;
        self.va = Seq::ZERO;
    }
}
