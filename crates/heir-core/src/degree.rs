//! Kinship degree classification.
//!
//! Decides which single degree governs the non-spouse part of the estate.
//! Rules are checked in priority order and the first match wins:
//!
//! 1. **First**: a child of the decedent is alive, or has a living
//!    descendant at any depth.
//! 2. **Second**: a parent is alive, or a sibling line (the parent's other
//!    children, excluding the decedent) holds a living person.
//! 3. **Third**: a grandparent is alive, or a grandparent has another
//!    living child (an uncle or aunt). Cousins never qualify.
//! 4. **None**: nobody besides a spouse can inherit.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::{contains_living, Search};
use crate::types::{FamilyNode, ParentType};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    First,
    Second,
    Third,
    None,
}

impl Degree {
    /// The spouse's statutory fraction as `(numerator, denominator)`.
    pub fn spouse_fraction(&self) -> (u64, u64) {
        match self {
            Self::First => (1, 4),
            Self::Second => (1, 2),
            Self::Third => (3, 4),
            Self::None => (1, 1),
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::None => "none",
        };
        f.write_str(s)
    }
}

/// Classify the tree rooted at the decedent. Pure read.
pub fn classify(root: &FamilyNode) -> Degree {
    let degree = if has_first_degree(root) {
        Degree::First
    } else if has_second_degree(root) {
        Degree::Second
    } else if has_third_degree(root) {
        Degree::Third
    } else {
        Degree::None
    };
    debug!(decedent = %root.id(), %degree, "classified kinship degree");
    degree
}

pub(crate) fn has_first_degree(root: &FamilyNode) -> bool {
    contains_living(root, Search::descendants())
}

pub(crate) fn has_second_degree(root: &FamilyNode) -> bool {
    ParentType::ALL
        .iter()
        .filter_map(|&side| root.parent(side))
        .any(|parent| parent_side_has_heir(parent, root.id()))
}

pub(crate) fn has_third_degree(root: &FamilyNode) -> bool {
    ParentType::ALL
        .iter()
        .filter_map(|&side| root.parent(side))
        .any(grandparent_side_has_heir)
}

/// A parent side inherits if the parent lives or a sibling line of the
/// decedent holds a living person.
pub(crate) fn parent_side_has_heir(parent: &FamilyNode, decedent_id: &str) -> bool {
    contains_living(parent, Search::subtree().excluding(decedent_id))
}

/// A grandparent side inherits if a grandparent lives or a grandparent has
/// a living child other than the intervening parent.
pub(crate) fn grandparent_side_has_heir(parent: &FamilyNode) -> bool {
    parent.parents.values().any(|grandparent| {
        contains_living(grandparent, Search::subtree().excluding(parent.id()).within(1))
    })
}
