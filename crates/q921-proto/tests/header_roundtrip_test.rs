//! Header encode/decode property tests.
//!
//! Every frame kind built from arbitrary (SAPI, TEI, C/R, P/F, N(S), N(R))
//! must decode back to the same fields, and the decoder must never panic on
//! arbitrary input.

use proptest::prelude::*;
use q921_proto::{
    Address, Control, Frame, FrameKind, Header, Seq, SupervisoryKind, UnnumberedKind,
};

fn address() -> impl Strategy<Value = Address> {
    (0..=Address::MAX_SAPI, any::<bool>(), 0..=Address::MAX_TEI)
        .prop_map(|(sapi, cr, tei)| Address { sapi, cr, tei })
}

fn seq() -> impl Strategy<Value = Seq> {
    (0u8..128).prop_map(Seq::new)
}

fn control() -> impl Strategy<Value = Control> {
    let supervisory = prop_oneof![
        Just(SupervisoryKind::Rr),
        Just(SupervisoryKind::Rnr),
        Just(SupervisoryKind::Rej),
    ];
    let unnumbered = prop_oneof![
        Just(UnnumberedKind::Sabme),
        Just(UnnumberedKind::Dm),
        Just(UnnumberedKind::Disc),
        Just(UnnumberedKind::Ua),
        Just(UnnumberedKind::Ui),
        Just(UnnumberedKind::Frmr),
        Just(UnnumberedKind::Xid),
    ];

    prop_oneof![
        (seq(), seq(), any::<bool>()).prop_map(|(ns, nr, poll)| Control::Information {
            ns,
            nr,
            poll
        }),
        (supervisory, seq(), any::<bool>()).prop_map(|(kind, nr, poll_final)| {
            Control::Supervisory { kind, nr, poll_final }
        }),
        (unnumbered, any::<bool>())
            .prop_map(|(kind, poll_final)| Control::Unnumbered { kind, poll_final }),
    ]
}

proptest! {
    #[test]
    fn header_roundtrip(address in address(), control in control()) {
        let header = Header { address, control };

        let mut buf = [0u8; Header::MAX_SIZE];
        let n = header.encode_into(&mut buf).unwrap();
        prop_assert_eq!(n, header.wire_len());

        let decoded = Header::decode(&buf[..n]).unwrap();
        prop_assert_eq!(decoded, header);
    }

    #[test]
    fn i_frame_payload_survives_placeholder(
        address in address(),
        ns in seq(),
        nr in seq(),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let header = Header::information(address, ns, nr, false);

        let mut raw = vec![0u8; header.wire_len()];
        header.encode_into(&mut raw).unwrap();
        raw.extend_from_slice(&payload);
        raw.extend_from_slice(&[0u8; Frame::FCS_LEN]);

        let frame = Frame::parse(&raw).unwrap();
        prop_assert_eq!(frame.kind(), FrameKind::I);
        prop_assert_eq!(frame.info, payload.as_slice());
    }

    #[test]
    fn parse_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        let _ = Frame::parse(&bytes);
    }
}
