//! Deterministic simulation harness for the Q.921 engine.
//!
//! Two trunks, one on each side of the user-network interface, are wired
//! back to back. Time is a shared counter that only moves when a test says
//! so, and frame loss is drawn from a seeded RNG, so every run with the same
//! seed produces the same frame sequence.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scenario;
pub mod sim;

pub use scenario::{NetworkEvent, Scenario, World, oracle};
pub use sim::{SimClock, SimInbox, SimTrunk, SimWire};
