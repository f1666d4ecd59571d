//! Share accumulator threaded through the distribution routines.
//!
//! The routines never touch the tree; they record `person id -> cents` here
//! and the calculator applies the result in one pass.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::types::{FamilyTree, Person};

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    shares: BTreeMap<String, u64>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` for `person`. Each person is assigned at most once;
    /// a zero amount records nothing.
    pub fn assign(&mut self, person: &Person, amount: u64) {
        if amount == 0 {
            return;
        }
        trace!(id = %person.id, amount, "assign share");
        let previous = self.shares.insert(person.id.clone(), amount);
        debug_assert!(previous.is_none(), "share assigned twice to {}", person.id);
    }

    pub fn get(&self, id: &str) -> u64 {
        self.shares.get(id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.shares.values().sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.shares.iter().map(|(id, &amount)| (id.as_str(), amount))
    }

    /// Write every recorded share into `tree` and recompute percentages
    /// against the allocation total. Persons without an entry end at zero.
    pub fn apply_to(&self, tree: &mut FamilyTree) {
        let total = self.total();
        tree.reset_shares();
        tree.root.for_each_person_mut(&mut |p| {
            p.share = self.get(&p.id);
            p.share_percentage = crate::constants::percentage(p.share, total);
        });
    }
}
