//! Property-based tests for queue position planning.

use proptest::prelude::*;
use std::collections::HashSet;

use opsdesk_shared::types::WorkOrderNumber;

use crate::workorder::queue::WorkQueue;

fn queue(n: u32) -> Vec<(WorkOrderNumber, u32)> {
    (1..=n)
        .map(|i| (WorkOrderNumber::new(format!("WO{i:04}")), i))
        .collect()
}

fn apply(entries: &[(WorkOrderNumber, u32)], updates: &[(WorkOrderNumber, u32)]) -> Vec<u32> {
    entries
        .iter()
        .map(|(number, position)| {
            updates
                .iter()
                .find(|(n, _)| n == number)
                .map_or(*position, |(_, p)| *p)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After any valid move the positions are exactly {1..N}.
    #[test]
    fn prop_move_preserves_dense_permutation(
        len in 1u32..20,
        target in 1u32..20,
        new_index in 1u32..20,
    ) {
        let target = (target % len) + 1;
        let new_index = (new_index % len) + 1;

        let entries = queue(len);
        let target_number = WorkOrderNumber::new(format!("WO{target:04}"));
        let updates = WorkQueue::plan_move(&entries, &target_number, new_index).unwrap();

        let positions = apply(&entries, &updates);
        let unique: HashSet<u32> = positions.iter().copied().collect();
        prop_assert_eq!(unique.len(), positions.len());
        prop_assert_eq!(
            unique,
            (1..=len).collect::<HashSet<u32>>()
        );
    }

    /// The moved entry always lands exactly on the requested index.
    #[test]
    fn prop_moved_entry_lands_on_target(
        len in 1u32..20,
        target in 1u32..20,
        new_index in 1u32..20,
    ) {
        let target = (target % len) + 1;
        let new_index = (new_index % len) + 1;

        let entries = queue(len);
        let target_number = WorkOrderNumber::new(format!("WO{target:04}"));
        let updates = WorkQueue::plan_move(&entries, &target_number, new_index).unwrap();

        if target == new_index {
            prop_assert!(updates.is_empty());
        } else {
            let landed = updates
                .iter()
                .find(|(n, _)| n == &target_number)
                .map(|(_, p)| *p);
            prop_assert_eq!(landed, Some(new_index));
        }
    }

    /// Removal always restores a dense 1..N-1 permutation.
    #[test]
    fn prop_remove_preserves_dense_permutation(
        len in 2u32..20,
        removed in 1u32..20,
    ) {
        let removed = (removed % len) + 1;

        let entries = queue(len);
        let updates = WorkQueue::plan_remove(&entries, removed);
        let remaining: Vec<(WorkOrderNumber, u32)> = entries
            .into_iter()
            .filter(|(_, position)| *position != removed)
            .collect();

        let positions = apply(&remaining, &updates);
        let unique: HashSet<u32> = positions.iter().copied().collect();
        prop_assert_eq!(
            unique,
            (1..=len - 1).collect::<HashSet<u32>>()
        );
    }
}
