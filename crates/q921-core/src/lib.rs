//! Q.921 (LAPD) data-link engine.
//!
//! Owns the per-trunk link state and drives it from two inputs: frames
//! received from layer 1 and the passage of time. Neither input is read by
//! the engine itself. Received frames are pushed in with
//! [`Trunk::queue_frame`] and processed with [`Trunk::rx12`]; time arrives
//! through a registered [`Clock`] on [`Trunk::timer_tick`], or directly via
//! [`Trunk::timer_tick_at`]. Outbound frames leave through the [`Layer1`]
//! endpoint and accepted information fields go up through [`Layer3`].
//!
//! # Components
//!
//! - [`queue`]: Variable-length message FIFO in one fixed buffer
//! - [`link`]: Role, C/R bit rules and the V(S)/V(R)/V(A) counters
//! - [`timer`]: T200/T203 deadlines
//! - [`trunk`]: Dispatcher and frame builders
//! - [`config`]: Trunk settings with defaults
//! - [`mod@env`]: Clock abstraction
//! - [`layer`]: Layer 1 and layer 3 endpoints
//! - [`error`]: Error types

pub mod config;
pub mod env;
pub mod error;
pub mod layer;
pub mod link;
pub mod queue;
pub mod timer;
pub mod trunk;

pub use config::TrunkConfig;
pub use env::{Clock, MonotonicClock};
pub use error::{ConfigError, QueueError, TrunkError};
pub use layer::{Layer1, Layer3};
pub use link::{CommandResponse, LinkState, Role};
pub use queue::FrameQueue;
pub use timer::{Expired, TimerSet};
pub use trunk::{SendResult, Trunk};
