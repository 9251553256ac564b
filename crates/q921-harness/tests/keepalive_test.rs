//! Idle-link supervision via T203.

use q921_core::{Role, TrunkConfig};
use q921_harness::{Scenario, oracle};

#[test]
fn idle_link_polls_once_per_t203() {
    let result = Scenario::new("T203 keepalive")
        .start(Role::Network)
        .advance(9_999)
        .oracle(oracle::all_of(vec![
            oracle::frames_sent(Role::Network, 1),
            oracle::frames_sent(Role::User, 1),
        ]))
        .run();
    assert!(result.is_ok(), "nothing should fire before T203: {result:?}");

    // Both sides armed T203 at t=0. Each polls with an RR command and
    // answers the other's poll with an RR response.
    let world = Scenario::new("T203 keepalive")
        .start(Role::Network)
        .advance(10_000)
        .oracle(oracle::all_of(vec![
            oracle::frames_sent(Role::Network, 3),
            oracle::frames_sent(Role::User, 3),
            oracle::in_sync(),
        ]))
        .run_into_world()
        .unwrap();

    assert_eq!(world.trunk(Role::Network).timers().t203_deadline(), Some(20_000));
    assert_eq!(world.trunk(Role::User).timers().t203_deadline(), Some(20_000));
}

#[test]
fn keepalive_repeats_every_period() {
    let config = TrunkConfig { t203_ms: 500, ..TrunkConfig::default() };

    let result = Scenario::new("repeated keepalive")
        .network_config(config.clone())
        .user_config(config)
        .start(Role::Network)
        .advance(500)
        .advance(500)
        .advance(500)
        .oracle(oracle::all_of(vec![
            // SABME + 3 × (RR command + RR response)
            oracle::frames_sent(Role::Network, 7),
            oracle::frames_sent(Role::User, 7),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {result:?}");
}

#[test]
fn unstarted_link_stays_silent() {
    let result = Scenario::new("no T203 without start")
        .advance(60_000)
        .oracle(oracle::all_of(vec![
            oracle::frames_sent(Role::Network, 0),
            oracle::frames_sent(Role::User, 0),
        ]))
        .run();

    assert!(result.is_ok(), "scenario should succeed: {result:?}");
}
