//! Frame decode must never panic, and anything it accepts must re-encode to
//! the same header bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use q921_proto::{Frame, Header};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = Frame::parse(data) else {
        return;
    };

    let mut buf = [0u8; Header::MAX_SIZE];
    let len = frame.header.encode_into(&mut buf).unwrap();
    let reparsed = Header::decode(&buf[..len]).unwrap();
    assert_eq!(reparsed, frame.header);

    let _ = format!("{frame:#}");
});
