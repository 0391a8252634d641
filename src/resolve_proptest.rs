//! Property-based tests for identifier resolution.

#[cfg(test)]
mod proptest_tests {
    use crate::resolve::{resolve, NamedEntity, Resolution};
    use proptest::prelude::*;

    fn snapshot() -> impl Strategy<Value = Vec<NamedEntity>> {
        prop::collection::vec(("[a-z0-9]{6,10}", "[A-Za-z ]{0,12}"), 1..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(id, name)| NamedEntity::new(id, name))
                .collect()
        })
    }

    proptest! {
        /// Property: an input equal to some ID always resolves to that ID
        #[test]
        fn exact_id_always_resolves(candidates in snapshot(), pick in any::<prop::sample::Index>()) {
            let target = &candidates[pick.index(candidates.len())];
            prop_assert_eq!(
                resolve(&candidates, &target.id),
                Resolution::Resolved(target.id.clone())
            );
        }

        /// Property: resolution is deterministic
        #[test]
        fn resolve_is_deterministic(candidates in snapshot(), input in "[A-Za-z ]{0,6}") {
            prop_assert_eq!(resolve(&candidates, &input), resolve(&candidates, &input));
        }

        /// Property: a resolved ID always belongs to the snapshot, and an
        /// unresolved outcome echoes the input
        #[test]
        fn outcome_is_grounded(candidates in snapshot(), input in "[A-Za-z ]{0,6}") {
            match resolve(&candidates, &input) {
                Resolution::Resolved(id) => prop_assert!(candidates.iter().any(|e| e.id == id)),
                Resolution::Ambiguous(matches) => {
                    prop_assert!(matches.len() > 1);
                    for m in &matches {
                        prop_assert!(m.name.to_lowercase().contains(&input.to_lowercase()));
                    }
                }
                Resolution::Unresolved(raw) => prop_assert_eq!(raw, input),
            }
        }
    }
}
