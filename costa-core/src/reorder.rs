//! Hand-ordering of catalog items.
//!
//! Moving an item up or down swaps it with its neighbor in the current
//! `sort_order`-ascending sequence and renumbers the whole sequence to
//! 0-based positions. The resulting batch is persisted in one shot through
//! `CatalogStore::batch_reorder`.

use crate::item::CatalogItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(MoveDirection::Up),
            "down" => Some(MoveDirection::Down),
            _ => None,
        }
    }
}

/// One (id, sort_order) pair of a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderAssignment {
    pub id: u32,
    pub sort_order: i32,
}

/// Compute the full sort_order assignment after moving `target_id` one
/// position in `direction`.
///
/// Boundary moves (first item up, last item down) and unknown ids are no-ops
/// and return the current assignment unchanged. The batch must be applied
/// all-or-nothing by the store.
pub fn reorder(
    items: &[CatalogItem],
    target_id: u32,
    direction: MoveDirection,
) -> Vec<ReorderAssignment> {
    let mut sequence: Vec<&CatalogItem> = items.iter().collect();
    sequence.sort_by_key(|item| item.sort_order);

    let current = || -> Vec<ReorderAssignment> {
        sequence
            .iter()
            .map(|item| ReorderAssignment {
                id: item.id,
                sort_order: item.sort_order,
            })
            .collect()
    };

    let Some(index) = sequence.iter().position(|item| item.id == target_id) else {
        return current();
    };

    let neighbor = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < sequence.len() => index + 1,
        _ => return current(),
    };

    sequence.swap(index, neighbor);
    sequence
        .iter()
        .enumerate()
        .map(|(position, item)| ReorderAssignment {
            id: item.id,
            sort_order: position as i32,
        })
        .collect()
}
