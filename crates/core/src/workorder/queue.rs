//! Work queue position planning.
//!
//! Work orders carry a dense, unique position index (1..N). This module
//! computes the position updates a move or removal requires; the store
//! applies them under its queue lock so the permutation invariant holds
//! under concurrency.

use opsdesk_shared::types::WorkOrderNumber;

use super::error::WorkOrderError;

/// A planned position change for one work order.
pub type PositionUpdate = (WorkOrderNumber, u32);

/// Stateless planner for queue position changes.
pub struct WorkQueue;

impl WorkQueue {
    /// The position a newly created work order is appended at.
    #[must_use]
    pub fn next_position(positions: &[u32]) -> u32 {
        positions.iter().max().map_or(1, |max| max + 1)
    }

    /// Plans moving `target` to `new_index` within the queue.
    ///
    /// Entries strictly between the old and new position shift by one to
    /// close the gap; the moved entry lands exactly on `new_index`. Returns
    /// only the entries whose position changes.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderError::PositionOutOfRange`] when `new_index` is not
    /// in `1..=N`, where N is the queue length, and
    /// [`WorkOrderError::NotInQueue`] when `target` is absent from `entries`.
    pub fn plan_move(
        entries: &[(WorkOrderNumber, u32)],
        target: &WorkOrderNumber,
        new_index: u32,
    ) -> Result<Vec<PositionUpdate>, WorkOrderError> {
        let len = u32::try_from(entries.len()).unwrap_or(u32::MAX);
        if new_index == 0 || new_index > len {
            return Err(WorkOrderError::PositionOutOfRange {
                requested: new_index,
                len,
            });
        }

        let old_index = entries
            .iter()
            .find(|(number, _)| number == target)
            .map(|(_, position)| *position)
            .ok_or_else(|| WorkOrderError::NotInQueue(target.to_string()))?;

        if old_index == new_index {
            return Ok(vec![]);
        }

        let mut updates = Vec::new();
        for (number, position) in entries {
            if number == target {
                updates.push((number.clone(), new_index));
            } else if old_index < new_index && *position > old_index && *position <= new_index {
                // Moving down: the window shifts up by one.
                updates.push((number.clone(), position - 1));
            } else if new_index < old_index && *position >= new_index && *position < old_index {
                // Moving up: the window shifts down by one.
                updates.push((number.clone(), position + 1));
            }
        }
        Ok(updates)
    }

    /// Plans closing the gap left by removing the entry at `removed_position`.
    ///
    /// Every entry above the removed position shifts down by one, restoring a
    /// dense 1..N-1 permutation.
    #[must_use]
    pub fn plan_remove(
        entries: &[(WorkOrderNumber, u32)],
        removed_position: u32,
    ) -> Vec<PositionUpdate> {
        entries
            .iter()
            .filter(|(_, position)| *position > removed_position)
            .map(|(number, position)| (number.clone(), position - 1))
            .collect()
    }
}
