//! Simulated clock and layer endpoints.

use std::{cell::Cell, convert::Infallible, rc::Rc};

use bytes::Bytes;
use q921_core::{Clock, Layer1, Layer3, Trunk};

/// Trunk wired to simulated endpoints.
pub type SimTrunk = Trunk<SimWire, SimInbox>;

/// Manually advanced millisecond clock.
///
/// Clones share the same counter, so one handle can drive every trunk.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u64>>,
}

impl SimClock {
    /// Clock starting at `start` milliseconds.
    pub fn new(start: u64) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    /// Current time.
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now()
    }
}

/// Layer 1 that captures every transmitted frame.
#[derive(Debug, Default)]
pub struct SimWire {
    outbox: Vec<Bytes>,
    transmitted: usize,
}

impl SimWire {
    /// Frames transmitted since the last [`take`](Self::take).
    pub fn pending(&self) -> &[Bytes] {
        &self.outbox
    }

    /// Remove and return pending frames.
    pub fn take(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.outbox)
    }

    /// Frames transmitted over the wire's lifetime.
    pub fn transmitted(&self) -> usize {
        self.transmitted
    }
}

impl Layer1 for SimWire {
    type Error = Infallible;

    fn transmit(&mut self, frame: &[u8]) -> Result<usize, Self::Error> {
        self.outbox.push(Bytes::copy_from_slice(frame));
        self.transmitted += 1;
        Ok(frame.len())
    }
}

/// Layer 3 that records delivered information fields.
#[derive(Debug, Default)]
pub struct SimInbox {
    delivered: Vec<Bytes>,
}

impl SimInbox {
    /// Everything delivered so far, in order.
    pub fn delivered(&self) -> &[Bytes] {
        &self.delivered
    }
}

impl Layer3 for SimInbox {
    type Error = Infallible;

    fn deliver(&mut self, info: &[u8]) -> Result<(), Self::Error> {
        self.delivered.push(Bytes::copy_from_slice(info));
        Ok(())
    }
}
