//! Properties of the pure release curve.
//!
//! Invariants tested:
//! - Vested amount never decreases as time moves forward
//! - Vested amount never exceeds the allocation
//! - Everything is vested once the schedule has run out

use proptest::prelude::*;
use soroban_sdk::{Env, String};
use vesting::schedule::vested_amount;
use vesting::VestingStrategy;

fn strategy(env: &Env, start: u64, cliff: u64, duration: u64, bps: u32) -> VestingStrategy {
    VestingStrategy {
        id: 0,
        name: String::from_str(env, "prop"),
        cliff,
        start,
        duration,
        initial_unlock_bps: bps,
        revocable: true,
    }
}

proptest! {
    #[test]
    fn prop_vested_is_monotonic(
        total in 0i128..=1_000_000_000_000i128,
        start in 0u64..=1_000_000u64,
        cliff in 0u64..=100_000u64,
        duration in 0u64..=10_000_000u64,
        bps in 0u32..=10_000u32,
        t in 0u64..=20_000_000u64,
        dt in 0u64..=1_000_000u64,
    ) {
        let env = Env::default();
        let s = strategy(&env, start, cliff, duration, bps);
        let earlier = vested_amount(total, &s, t).unwrap();
        let later = vested_amount(total, &s, t + dt).unwrap();
        prop_assert!(later >= earlier);
        prop_assert!(earlier >= 0);
        prop_assert!(later <= total);
    }

    #[test]
    fn prop_fully_vested_after_end(
        total in 0i128..=1_000_000_000_000i128,
        start in 0u64..=1_000_000u64,
        cliff in 0u64..=100_000u64,
        duration in 0u64..=10_000_000u64,
        bps in 0u32..=10_000u32,
        after in 0u64..=1_000_000u64,
    ) {
        let env = Env::default();
        let s = strategy(&env, start, cliff, duration, bps);
        prop_assert_eq!(vested_amount(total, &s, s.end() + after).unwrap(), total);
    }
}
