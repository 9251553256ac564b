//! Dispatcher behaviour over longer frame sequences.
//!
//! Frames are built with the codec, queued raw, and drained; the assertions
//! look only at what reached layer 1 and layer 3.

use std::convert::Infallible;

use proptest::prelude::*;
use q921_core::{CommandResponse, Layer1, Layer3, QueueError, Role, Trunk, TrunkConfig};
use q921_proto::{Address, Frame, FrameKind, Header, Seq};

#[derive(Default)]
struct Wire(Vec<Vec<u8>>);

impl Layer1 for Wire {
    type Error = Infallible;

    fn transmit(&mut self, frame: &[u8]) -> Result<usize, Infallible> {
        self.0.push(frame.to_vec());
        Ok(frame.len())
    }
}

#[derive(Default)]
struct Inbox(Vec<Vec<u8>>);

impl Layer3 for Inbox {
    type Error = Infallible;

    fn deliver(&mut self, info: &[u8]) -> Result<(), Infallible> {
        self.0.push(info.to_vec());
        Ok(())
    }
}

/// Wire image of an I-frame the network side would send.
fn network_i_frame(ns: u8, nr: u8, payload: &[u8]) -> Vec<u8> {
    let address = Address { sapi: 0, cr: true, tei: 0 };
    let header = Header::information(address, Seq::new(ns), Seq::new(nr), true);

    let mut raw = vec![0u8; header.wire_len()];
    header.encode_into(&mut raw).unwrap();
    raw.extend_from_slice(payload);
    raw.extend_from_slice(&[0u8; Frame::FCS_LEN]);
    raw
}

fn user_trunk() -> Trunk<Wire, Inbox> {
    Trunk::new(TrunkConfig::default(), Wire::default(), Inbox::default()).unwrap()
}

#[test]
fn full_queue_loses_frames() {
    let config = TrunkConfig { queue_slots: 3, ..TrunkConfig::default() };
    let mut user = Trunk::new(config, Wire::default(), Inbox::default()).unwrap();

    user.queue_frame(&network_i_frame(0, 0, b"a")).unwrap();
    user.queue_frame(&network_i_frame(1, 0, b"b")).unwrap();
    assert_eq!(
        user.queue_frame(&network_i_frame(2, 0, b"c")),
        Err(QueueError::SlotsExhausted(2))
    );

    assert_eq!(user.drain(), 2);
    assert_eq!(user.layer3().0, vec![b"a".to_vec(), b"b".to_vec()]);
}

#[test]
fn i_frames_are_accepted_without_sabme() {
    let mut user = user_trunk();
    // N(S) is not checked against V(R)
    user.queue_frame(&network_i_frame(42, 0, b"out of order")).unwrap();
    user.rx12();

    assert_eq!(user.layer3().0.len(), 1);
    assert_eq!(user.link().vr(), Seq::new(1));
}

#[test]
fn builders_use_role_cr_bits() {
    let mut user = user_trunk();
    user.send_rej(CommandResponse::Command, true).unwrap();
    user.send_rnr(CommandResponse::Response, false).unwrap();
    user.send_disc(true).unwrap();
    user.send_dm(false).unwrap();

    let decoded: Vec<(FrameKind, bool, bool)> = user
        .layer1()
        .0
        .iter()
        .map(|raw| {
            let frame = Frame::parse(raw).unwrap();
            (frame.kind(), frame.header.address.cr, frame.header.control.poll_final())
        })
        .collect();

    assert_eq!(
        decoded,
        vec![
            (FrameKind::REJ, false, true),
            (FrameKind::RNR, true, false),
            (FrameKind::DISC, false, true),
            (FrameKind::DM, true, false),
        ]
    );
}

proptest! {
    /// Every received I-frame is delivered once and answered with an RR
    /// response carrying the updated V(R), across the modulo-128 wrap.
    #[test]
    fn every_i_frame_gets_one_rr(payloads in proptest::collection::vec(
        proptest::collection::vec(any::<u8>(), 0..32),
        1..300,
    )) {
        let mut user = user_trunk();

        for (index, payload) in payloads.iter().enumerate() {
            let ns = (index % 128) as u8;
            user.queue_frame(&network_i_frame(ns, 0, payload)).unwrap();
            prop_assert!(user.rx12());

            let expected_vr = Seq::new(((index + 1) % 128) as u8);
            prop_assert_eq!(user.link().vr(), expected_vr);

            let rr = user.layer1().0.last().unwrap();
            let frame = Frame::parse(rr).unwrap();
            prop_assert_eq!(frame.kind(), FrameKind::RR);
            prop_assert_eq!(frame.header.control.nr(), Some(expected_vr));
            // User-side response
            prop_assert!(frame.header.address.cr);
        }

        prop_assert_eq!(&user.layer3().0, &payloads);
        prop_assert_eq!(user.layer1().0.len(), payloads.len());
    }
}
