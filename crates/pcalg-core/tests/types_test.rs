use pcalg_core::traits::{Cancellable, CancellationToken};
use pcalg_core::{ConditioningSet, Decision, PcError};
use proptest::prelude::*;

#[test]
fn conditioning_set_is_sorted_and_deduplicated() {
    let set = ConditioningSet::from_slice(&[5, 1, 3, 1]);
    assert_eq!(set.as_slice(), &[1, 3, 5]);
    assert!(set.contains(3));
    assert!(!set.contains(2));
    assert_eq!(set.to_string(), "{1, 3, 5}");
    assert_eq!(ConditioningSet::new().to_string(), "{}");
}

#[test]
fn decision_from_p_value_uses_strict_threshold() {
    assert_eq!(Decision::from_p_value(0.5, 0.05), Decision::Independent);
    assert_eq!(Decision::from_p_value(0.05, 0.05), Decision::Dependent);
    assert!(!Decision::from_p_value(0.001, 0.05).is_independent());
}

#[test]
fn cancellation_token_is_shared_between_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!token.is_cancelled());
    assert!(token.check().is_ok());
    clone.cancel();
    assert!(token.is_cancelled());
    assert!(matches!(token.check(), Err(PcError::Cancelled)));
}

proptest! {
    #[test]
    fn conditioning_set_collect_matches_from_slice(vars in prop::collection::vec(0usize..50, 0..12)) {
        let collected: ConditioningSet = vars.iter().copied().collect();
        prop_assert_eq!(&collected, &ConditioningSet::from_slice(&vars));
        prop_assert!(collected.as_slice().windows(2).all(|w| w[0] < w[1]));
    }
}
