//! Arbitrary write/overwrite/pop sequences against the frame queue.
//!
//! Each input byte pair is one operation: the first byte selects the
//! operation, the second the message length.

#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use q921_core::FrameQueue;

fuzz_target!(|data: &[u8]| {
    let mut queue = FrameQueue::new(vec![0u8; 6 * 8 + 96], 6).unwrap();
    let mut model: VecDeque<Vec<u8>> = VecDeque::new();

    for (n, op) in data.chunks_exact(2).enumerate() {
        let message = vec![n as u8; usize::from(op[1] % 64) + 1];

        match op[0] % 3 {
            0 => {
                if queue.write(&message).is_ok() {
                    model.push_back(message);
                }
            },
            1 => {
                let before = queue.len();
                queue.write_overwrite(&message).unwrap();
                for _ in 0..before + 1 - queue.len() {
                    model.pop_front();
                }
                model.push_back(message);
            },
            _ => {
                assert_eq!(queue.pop(), model.pop_front().is_some());
            },
        }

        assert_eq!(queue.len(), model.len());
        assert_eq!(queue.peek(), model.front().map(Vec::as_slice));
    }
});
