//! Flattened per-person view of a calculation.

use serde::Serialize;

use crate::relation::Relation;
use crate::types::Person;

/// One row of the summary: who, how related, and what they receive.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HeirSummary {
    pub id: String,
    pub name: String,
    pub relation: Relation,
    pub is_alive: bool,
    /// Share in cents.
    pub share: u64,
    pub share_percentage: f64,
}

impl HeirSummary {
    pub fn new(person: &Person, relation: Relation) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
            relation,
            is_alive: person.is_alive,
            share: person.share,
            share_percentage: person.share_percentage,
        }
    }
}
