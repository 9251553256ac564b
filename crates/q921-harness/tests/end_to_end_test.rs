//! Two trunks exchanging frames over a perfect wire.

use q921_core::Role;
use q921_harness::{Scenario, oracle};

#[test]
fn i_frame_is_delivered_and_acknowledged() {
    let payload = b"0123456789".to_vec();

    let result = Scenario::new("single I-frame")
        .send(Role::Network, payload.clone())
        .oracle(oracle::all_of(vec![
            oracle::delivered(Role::User, vec![payload]),
            oracle::counters(Role::User, 0, 1, 0),
            oracle::counters(Role::Network, 1, 0, 1),
            oracle::frames_sent(Role::Network, 1),
            oracle::frames_sent(Role::User, 1),
            oracle::in_sync(),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {result:?}");
}

#[test]
fn acknowledgement_stops_t200() {
    let world = Scenario::new("T200 stopped by RR")
        .send(Role::User, &b"setup"[..])
        .oracle(oracle::no_frames_lost())
        .run_into_world()
        .unwrap();

    assert_eq!(world.trunk(Role::User).timers().t200_deadline(), None);
    assert_eq!(world.trunk(Role::User).link().outstanding(), 0);
}

#[test]
fn both_directions_interleave() {
    let result = Scenario::new("interleaved traffic")
        .send(Role::Network, &b"setup"[..])
        .send(Role::User, &b"call proceeding"[..])
        .send(Role::User, &b"alerting"[..])
        .send(Role::Network, &b"connect ack"[..])
        .oracle(oracle::all_of(vec![
            oracle::delivered(Role::User, vec![b"setup".to_vec(), b"connect ack".to_vec()]),
            oracle::delivered(
                Role::Network,
                vec![b"call proceeding".to_vec(), b"alerting".to_vec()],
            ),
            oracle::counters(Role::Network, 2, 2, 2),
            oracle::counters(Role::User, 2, 2, 2),
            oracle::in_sync(),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {result:?}");
}

#[test]
fn sabme_resets_peer_counters() {
    let result = Scenario::new("SABME after traffic")
        .send(Role::User, &b"one"[..])
        .send(Role::User, &b"two"[..])
        .send(Role::User, &b"three"[..])
        .start(Role::Network)
        .oracle(oracle::all_of(vec![
            oracle::counters(Role::User, 0, 0, 0),
            // The sender of SABME keeps its own counters
            oracle::counters(Role::Network, 0, 3, 0),
            // 3 RR + SABME, 3 I + UA
            oracle::frames_sent(Role::Network, 4),
            oracle::frames_sent(Role::User, 4),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {result:?}");
}
