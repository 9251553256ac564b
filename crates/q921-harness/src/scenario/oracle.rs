//! Reusable oracle checks.
//!
//! Each helper returns an [`OracleFn`]; combine them with [`all_of`].

use q921_core::Role;
use q921_proto::Seq;

use crate::scenario::{OracleFn, World};

/// Run every oracle, stopping at the first failure.
pub fn all_of(oracles: Vec<OracleFn>) -> OracleFn {
    Box::new(move |world| oracles.iter().try_for_each(|oracle| oracle(world)))
}

/// `role` delivered exactly `expected` to layer 3, in order.
pub fn delivered(role: Role, expected: Vec<Vec<u8>>) -> OracleFn {
    Box::new(move |world| {
        let actual: Vec<&[u8]> =
            world.trunk(role).layer3().delivered().iter().map(|info| &info[..]).collect();
        let expected: Vec<&[u8]> = expected.iter().map(Vec::as_slice).collect();
        if actual == expected {
            Ok(())
        } else {
            Err(format!("{role:?} delivered {actual:?}, expected {expected:?}"))
        }
    })
}

/// `role` has the given V(S), V(R), V(A).
pub fn counters(role: Role, vs: u8, vr: u8, va: u8) -> OracleFn {
    Box::new(move |world| {
        let link = world.trunk(role).link();
        let actual = (link.vs(), link.vr(), link.va());
        let expected = (Seq::new(vs), Seq::new(vr), Seq::new(va));
        if actual == expected {
            Ok(())
        } else {
            Err(format!("{role:?} V(S)/V(R)/V(A) = {actual:?}, expected {expected:?}"))
        }
    })
}

/// Both sides agree on sequence numbers and nothing is outstanding.
pub fn in_sync() -> OracleFn {
    Box::new(|world| {
        if world.in_sync() {
            Ok(())
        } else {
            Err(format!(
                "links out of sync: network {:?}, user {:?}",
                world.trunk(Role::Network).link(),
                world.trunk(Role::User).link()
            ))
        }
    })
}

/// The wire dropped nothing.
pub fn no_frames_lost() -> OracleFn {
    Box::new(|world| match world.frames_lost() {
        0 => Ok(()),
        lost => Err(format!("{lost} frames lost")),
    })
}

/// `role` transmitted exactly `count` frames.
pub fn frames_sent(role: Role, count: usize) -> OracleFn {
    Box::new(move |world| {
        let sent = world.frames_sent(role);
        if sent == count {
            Ok(())
        } else {
            Err(format!("{role:?} sent {sent} frames, expected {count}"))
        }
    })
}
