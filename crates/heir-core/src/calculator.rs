//! The inheritance calculator implementing [`EstateCalculator`].
//!
//! `calculate` validates the tree, classifies the governing degree, assigns
//! the spouse's fraction, distributes the remainder through the matching
//! degree routine, and writes the resulting shares back into the tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::allocation::Allocation;
use crate::constants::MAX_ESTATE_CENTS;
use crate::degree::{classify, Degree};
use crate::distribution::distribute;
use crate::error::{EstateError, InheritanceError};
use crate::relation::relations;
use crate::split::fraction_of;
use crate::summary::HeirSummary;
use crate::traits::EstateCalculator;
use crate::types::FamilyTree;

/// What happens to the portion of a parent side that has no heir.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VacantSidePolicy {
    /// Only sides holding an heir share the amount; an empty or absent side
    /// passes its portion to the other side of the same degree.
    #[default]
    AccrueToOtherSide,
    /// Fixed halves per side; an empty side's portion stays unallocated and
    /// shows up as `undistributed`.
    LeaveUndistributed,
}

impl fmt::Display for VacantSidePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccrueToOtherSide => f.write_str("accrue"),
            Self::LeaveUndistributed => f.write_str("retain"),
        }
    }
}

impl FromStr for VacantSidePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accrue" | "accrue_to_other_side" => Ok(Self::AccrueToOtherSide),
            "retain" | "leave_undistributed" => Ok(Self::LeaveUndistributed),
            other => Err(format!(
                "unknown vacant-side policy: {other} (expected accrue or retain)"
            )),
        }
    }
}

/// Calculator settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub vacant_side: VacantSidePolicy,
}

/// Outcome of one calculation.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Calculation {
    /// Governing kinship degree.
    pub degree: Degree,
    /// Estate value in cents.
    pub estate: u64,
    /// Spouse's share in cents (zero without a living spouse).
    pub spouse_share: u64,
    /// Sum of all assigned shares in cents.
    pub total_distributed: u64,
    /// The input tree with `share` and `share_percentage` filled in.
    pub tree: FamilyTree,
    /// Per-person amounts, the source the tree was annotated from.
    pub allocation: Allocation,
}

impl Calculation {
    /// Estate left unassigned (no heir anywhere, or a retained vacant side).
    pub fn undistributed(&self) -> u64 {
        self.estate - self.total_distributed
    }

    pub fn is_fully_distributed(&self) -> bool {
        self.total_distributed == self.estate
    }

    /// One entry per person in the tree except the decedent, in tree order.
    pub fn summary(&self) -> Vec<HeirSummary> {
        relations(&self.tree)
            .into_iter()
            .filter(|(person, _)| person.id != self.tree.decedent().id)
            .map(|(person, relation)| HeirSummary::new(person, relation))
            .collect()
    }

    /// Summary entries with a non-zero share.
    pub fn heirs(&self) -> Vec<HeirSummary> {
        self.summary()
            .into_iter()
            .filter(|entry| entry.share > 0)
            .collect()
    }
}

/// The production calculator.
#[derive(Debug, Clone, Default)]
pub struct InheritanceCalculator {
    config: CalculatorConfig,
}

impl InheritanceCalculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }
}

impl EstateCalculator for InheritanceCalculator {
    fn calculate(&self, mut tree: FamilyTree, estate: u64) -> Result<Calculation, InheritanceError> {
        if estate == 0 {
            return Err(EstateError::ZeroValue.into());
        }
        if estate > MAX_ESTATE_CENTS {
            return Err(EstateError::TooLarge(estate.to_string()).into());
        }
        tree.validate()?;
        tree.reset_shares();

        let degree = classify(&tree.root);

        let spouse_share = match tree.spouse() {
            Some(spouse) if spouse.is_alive => {
                let (numerator, denominator) = degree.spouse_fraction();
                fraction_of(estate, numerator, denominator)
            }
            _ => 0,
        };
        let remaining = estate - spouse_share;
        debug!(%degree, estate, spouse_share, remaining, "spouse share assigned");

        let mut allocation = distribute(degree, &tree.root, remaining, self.config.vacant_side);
        if let Some(spouse) = tree.spouse() {
            allocation.assign(spouse, spouse_share);
        }
        allocation.apply_to(&mut tree);

        let total_distributed = allocation.total();
        let calculation = Calculation {
            degree,
            estate,
            spouse_share,
            total_distributed,
            tree,
            allocation,
        };

        if calculation.is_fully_distributed() {
            info!(
                %degree,
                estate,
                heirs = calculation.allocation.len(),
                "estate distributed"
            );
        } else {
            warn!(
                %degree,
                estate,
                total_distributed,
                undistributed = calculation.undistributed(),
                policy = %self.config.vacant_side,
                "estate not fully distributed"
            );
        }
        Ok(calculation)
    }
}
