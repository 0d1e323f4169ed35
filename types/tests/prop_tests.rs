use proptest::prelude::*;

use lockvote_types::{Amount, Identity, RoundId, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Checked add agrees with u128 checked add.
    #[test]
    fn amount_checked_add_matches_raw(a in any::<u128>(), b in any::<u128>()) {
        let sum = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(sum.map(|s| s.raw()), a.checked_add(b));
    }

    /// Subtracting what was added restores the original amount.
    #[test]
    fn amount_add_then_sub_is_identity(a in 0u128..u64::MAX as u128, b in 0u128..u64::MAX as u128) {
        let sum = Amount::new(a).checked_add(Amount::new(b)).unwrap();
        prop_assert_eq!(sum.checked_sub(Amount::new(b)), Some(Amount::new(a)));
    }

    /// Round ids advance by exactly one and preserve ordering.
    #[test]
    fn round_id_next_is_successor(id in 0u64..u64::MAX) {
        let next = RoundId::new(id).next().unwrap();
        prop_assert_eq!(next.get(), id + 1);
        prop_assert!(next > RoundId::new(id));
    }

    /// Any alphanumeric identity survives serialization with validation intact.
    #[test]
    fn identity_bincode_keeps_value(raw in "[a-z0-9_]{1,40}") {
        let id = Identity::new(raw.clone());
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: Identity = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_str(), raw.as_str());
    }
}

#[test]
fn identity_rejects_empty_on_deserialize() {
    let encoded = bincode::serialize(&String::new()).unwrap();
    assert!(bincode::deserialize::<Identity>(&encoded).is_err());
}
