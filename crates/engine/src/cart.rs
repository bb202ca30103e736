//! The module contains the `Selection` (cart) and its derived total.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::leads::Lead;

/// The buyer's in-progress, uncommitted set of chosen lead ids.
///
/// Duplicate-free and insertion-ordered: the order only matters for display,
/// never for totals. Mutations are in-place but always complete before the
/// caller can observe the set again, so no partially updated state leaks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<Uuid>,
}

/// Result of resolving a selection against an inventory snapshot.
///
/// Members no longer present in the inventory are excluded from the total
/// and reported in `stale` instead of being silently summed as zero-cost
/// phantom items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartTotal {
    pub total_minor: i64,
    pub stale: Vec<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// Returns `true` if the id is in the selection afterwards. A double
    /// toggle always restores the previous state.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        match self.ids.iter().position(|member| *member == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    /// Inserts `id` if absent. Returns `true` if the set changed.
    pub fn insert(&mut self, id: Uuid) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id` if present. Returns `true` if the set changed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.ids.iter().position(|member| *member == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Resolves every member against `inventory` and sums the prices of the
    /// members that are still listed.
    pub fn total(&self, inventory: &[Lead]) -> CartTotal {
        let mut total_minor = 0;
        let mut stale = Vec::new();

        for id in &self.ids {
            match inventory.iter().find(|lead| lead.id == *id) {
                Some(lead) => total_minor += lead.price_minor,
                None => stale.push(*id),
            }
        }

        CartTotal { total_minor, stale }
    }
}
