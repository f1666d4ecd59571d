//! Trait interface between the calculation core and its callers.
//!
//! - [`EstateCalculator`]: share distribution (heir-core's
//!   [`InheritanceCalculator`](crate::calculator::InheritanceCalculator)
//!   implements it; heir-service consumes it).

use crate::calculator::Calculation;
use crate::error::InheritanceError;
use crate::types::FamilyTree;

/// Pure computation of statutory shares over a family tree.
///
/// Implementations take ownership of the tree, annotate it, and hand it
/// back inside the [`Calculation`]. They never touch anything but the tree
/// they are given, so distinct trees may be calculated concurrently.
pub trait EstateCalculator: Send + Sync {
    /// Distribute `estate` cents over `tree`.
    ///
    /// Fails only on invalid input (zero or oversized estate, empty or
    /// duplicate person ids). A tree without heirs is not an error: the
    /// result reports `total_distributed == 0`.
    fn calculate(&self, tree: FamilyTree, estate: u64) -> Result<Calculation, InheritanceError>;
}
