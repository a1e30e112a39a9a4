use proptest::prelude::*;

use accrue_types::{Rate, RatePolicy, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// elapsed_since(now) = now - self when now is later.
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
        prop_assert_eq!(t.checked_elapsed(now), Some(offset));
    }

    /// Going backwards saturates to zero, and the checked form refuses.
    #[test]
    fn timestamp_elapsed_backwards(base in 1u64..1_000_000, deficit in 1u64..1_000_000) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
        prop_assert_eq!(later.checked_elapsed(earlier), None);
    }

    /// The two direction policies agree exactly on equal values and disagree otherwise.
    #[test]
    fn policies_are_mirror_images(old in 0u128..u128::MAX, new in 0u128..u128::MAX) {
        let (old, new) = (Rate::new(old), Rate::new(new));
        let dec = RatePolicy::DecreaseOnly.is_allowed_transition(old, new);
        let inc = RatePolicy::IncreaseOnly.is_allowed_transition(old, new);
        if old == new {
            prop_assert!(dec && inc);
        } else {
            prop_assert!(dec != inc);
        }
    }

    /// Rate bincode serialization preserves the raw value.
    #[test]
    fn rate_bincode_preserves_raw(raw in 0u128..u128::MAX) {
        let rate = Rate::new(raw);
        let encoded = bincode::serialize(&rate).unwrap();
        let decoded: Rate = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.raw(), raw);
    }

    /// checked_accrual agrees with plain multiplication when it fits.
    #[test]
    fn accrual_matches_multiplication(
        raw in 0u128..1_000_000_000_000,
        secs in 0u64..1_000_000_000,
    ) {
        prop_assert_eq!(Rate::new(raw).checked_accrual(secs), Some(raw * secs as u128));
    }
}
