//! Scenario framework: scripted two-trunk runs checked by a mandatory
//! oracle.
//!
//! ```text
//! Scenario::new(..).start(..).send(..).advance(..)
//!        │ .oracle(check)
//!        ▼
//! RunnableScenario::run() ── steps ──> World ── oracle(&world) ──> Result
//! ```

mod builder;
pub mod oracle;
mod world;

pub use builder::{RunnableScenario, Scenario};
pub use world::{NetworkEvent, World};

/// Final-state check run after a scenario's steps.
pub type OracleFn = Box<dyn Fn(&World) -> Result<(), String>>;
