//! Seeded frame loss.
//!
//! Nothing is retransmitted, so loss shows up directly as missing
//! deliveries. What must hold regardless of the seed: delivered payloads
//! are an in-order subsequence of what was sent, none is duplicated, and
//! V(R) counts exactly the I-frames that arrived.

use proptest::prelude::*;
use q921_core::Role;
use q921_harness::Scenario;

proptest! {
    #[test]
    fn loss_never_reorders_or_duplicates(seed in any::<u64>(), count in 1usize..60) {
        let payloads: Vec<Vec<u8>> =
            (0..count).map(|i| format!("msg-{i}").into_bytes()).collect();

        let mut scenario = Scenario::new("lossy wire").seed(seed).loss(0.3);
        for payload in &payloads {
            scenario = scenario.send(Role::Network, payload.clone());
        }
        let world = scenario.oracle(Box::new(|_world| Ok(()))).run_into_world().unwrap();

        let delivered = world.trunk(Role::User).layer3().delivered();
        let mut remaining = payloads.iter();
        for got in delivered {
            prop_assert!(
                remaining.any(|sent| sent.as_slice() == &got[..]),
                "{got:?} delivered out of order or twice"
            );
        }

        let vr = world.trunk(Role::User).link().vr().value() as usize;
        prop_assert_eq!(vr, delivered.len() % 128);
        prop_assert_eq!(world.trunk(Role::Network).link().vs().value() as usize, count % 128);
    }

    #[test]
    fn same_seed_same_outcome(seed in any::<u64>()) {
        let run = || {
            let mut scenario = Scenario::new("replay").seed(seed).loss(0.5);
            for i in 0..20u8 {
                scenario = scenario.send(Role::User, vec![i]);
            }
            let world = scenario.oracle(Box::new(|_world| Ok(()))).run_into_world().unwrap();
            (world.frames_lost(), world.trunk(Role::Network).layer3().delivered().to_vec())
        };

        prop_assert_eq!(run(), run());
    }
}
