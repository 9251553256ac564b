//! Feed arbitrary frames through the dispatcher.
//!
//! Input is split on 0x7e into frames. The trunk must process every queued
//! frame without panicking, and never count more frames outstanding than it
//! sent.

#![no_main]

use std::convert::Infallible;

use libfuzzer_sys::fuzz_target;
use q921_core::{Layer1, Layer3, Role, Trunk, TrunkConfig};

struct Sink;

impl Layer1 for Sink {
    type Error = Infallible;

    fn transmit(&mut self, frame: &[u8]) -> Result<usize, Infallible> {
        Ok(frame.len())
    }
}

impl Layer3 for Sink {
    type Error = Infallible;

    fn deliver(&mut self, _info: &[u8]) -> Result<(), Infallible> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let config = TrunkConfig { role: Role::Network, ..TrunkConfig::default() };
    let mut trunk = Trunk::new(config, Sink, Sink).unwrap();
    let mut sent: u32 = 0;

    for (n, raw) in data.split(|&b| b == 0x7e).enumerate() {
        if n % 4 == 0 && trunk.send_i(b"probe", false).is_ok() {
            sent += 1;
        }
        if trunk.queue_frame(raw).is_ok() {
            assert!(trunk.rx12());
        }

        assert!(u32::from(trunk.link().outstanding()) <= sent);
    }
});
