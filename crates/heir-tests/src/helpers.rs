//! Shared builders for scenario and property tests.

use heir_core::constants::CENTS_PER_UNIT;
use heir_core::{
    Calculation, CalculatorConfig, EstateCalculator, FamilyNode, FamilyTree, InheritanceCalculator,
    Person, VacantSidePolicy,
};

/// Estate used by most scenarios: one million units, in cents.
pub const ESTATE: u64 = 1_000_000 * CENTS_PER_UNIT;

/// Whole units to cents.
pub fn units(n: u64) -> u64 {
    n * CENTS_PER_UNIT
}

/// A living person whose name is their id.
pub fn alive(id: &str) -> FamilyNode {
    FamilyNode::new(Person::new(id, id))
}

/// A deceased person whose name is their id.
pub fn dead(id: &str) -> FamilyNode {
    FamilyNode::new(Person::new(id, id).deceased())
}

/// The decedent `d1`, with a living spouse `s1` when `with_spouse` is set.
pub fn decedent(with_spouse: bool) -> FamilyNode {
    let root = dead("d1");
    if with_spouse {
        root.with_spouse(Person::new("s1", "Spouse"))
    } else {
        root
    }
}

/// Calculate [`ESTATE`] over `root` with the default policy.
pub fn run(root: FamilyNode) -> Calculation {
    run_with(root, ESTATE, VacantSidePolicy::default())
}

pub fn run_with(root: FamilyNode, estate: u64, vacant_side: VacantSidePolicy) -> Calculation {
    InheritanceCalculator::new(CalculatorConfig { vacant_side })
        .calculate(FamilyTree::new(root), estate)
        .unwrap_or_else(|e| panic!("calculation failed: {e}"))
}

/// Share of `id` in cents, read from the annotated tree.
pub fn share(calc: &Calculation, id: &str) -> u64 {
    calc.tree
        .find(id)
        .unwrap_or_else(|| panic!("no person {id} in tree"))
        .share
}
