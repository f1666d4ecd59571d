//! Degree-specific distribution of the non-spouse part of the estate.
//!
//! Each degree has one pure function taking the decedent's node and the
//! amount left after the spouse share, and returning an [`Allocation`].
//! Every equal division goes through [`split_evenly`], so each split sums
//! exactly to its input at every level of the tree.
//!
//! Representation: a deceased heir with living descendants forms a branch
//! whose share is divided equally among their own valid branches,
//! recursively, until it reaches living persons.

use tracing::debug;

use crate::allocation::Allocation;
use crate::calculator::VacantSidePolicy;
use crate::degree::{grandparent_side_has_heir, parent_side_has_heir, Degree};
use crate::search::valid_branches;
use crate::split::split_evenly;
use crate::types::{FamilyNode, ParentType, Person};

/// Dispatch to the routine for `degree`.
pub fn distribute(
    degree: Degree,
    root: &FamilyNode,
    amount: u64,
    policy: VacantSidePolicy,
) -> Allocation {
    match degree {
        Degree::First => first_degree(root, amount),
        Degree::Second => second_degree(root, amount, policy),
        Degree::Third => third_degree(root, amount, policy),
        Degree::None => Allocation::new(),
    }
}

// ---------------------------------------------------------------------------
// First degree
// ---------------------------------------------------------------------------

/// Descendants inherit per stirpes: one equal branch per child line.
pub fn first_degree(root: &FamilyNode, amount: u64) -> Allocation {
    let mut alloc = Allocation::new();
    distribute_descendants(root, None, amount, &mut alloc);
    alloc
}

/// Divide `amount` equally among the valid branches below `node` and
/// recurse into deceased branches. Returns the amount actually assigned,
/// which is zero only when `node` has no valid branch.
fn distribute_descendants(
    node: &FamilyNode,
    exclude_id: Option<&str>,
    amount: u64,
    alloc: &mut Allocation,
) -> u64 {
    let branches = valid_branches(node, exclude_id);
    if branches.is_empty() {
        return 0;
    }
    let parts = split_evenly(amount, branches.len());
    for (branch, part) in branches.into_iter().zip(parts) {
        if branch.is_alive() {
            alloc.assign(&branch.person, part);
        } else {
            distribute_descendants(branch, None, part, alloc);
        }
    }
    amount
}

// ---------------------------------------------------------------------------
// Second degree
// ---------------------------------------------------------------------------

/// Parents and their descendants, one half per side.
pub fn second_degree(root: &FamilyNode, amount: u64, policy: VacantSidePolicy) -> Allocation {
    let mut alloc = Allocation::new();
    let decedent = root.id();
    let sides = side_amounts(root, amount, policy, LoneSide::KeepsHalf, |parent| {
        parent_side_has_heir(parent, decedent)
    });
    for (side, parent, side_amount) in sides {
        let assigned = distribute_parent_side(parent, decedent, side_amount, &mut alloc);
        debug!(%side, side_amount, assigned, "second-degree side distributed");
    }
    alloc
}

/// A living parent takes the whole side; otherwise the side passes to the
/// parent's other children and their lines.
fn distribute_parent_side(
    parent: &FamilyNode,
    decedent_id: &str,
    amount: u64,
    alloc: &mut Allocation,
) -> u64 {
    if parent.is_alive() {
        alloc.assign(&parent.person, amount);
        return amount;
    }
    distribute_descendants(parent, Some(decedent_id), amount, alloc)
}

// ---------------------------------------------------------------------------
// Third degree
// ---------------------------------------------------------------------------

/// Grandparents and their living children, one half per side of the
/// decedent, then one half per group within a side.
pub fn third_degree(root: &FamilyNode, amount: u64, policy: VacantSidePolicy) -> Allocation {
    let mut alloc = Allocation::new();
    let sides = side_amounts(
        root,
        amount,
        policy,
        LoneSide::TakesAll,
        grandparent_side_has_heir,
    );
    for (side, parent, side_amount) in sides {
        let assigned = distribute_grandparent_side(parent, side_amount, &mut alloc);
        debug!(%side, side_amount, assigned, "third-degree side distributed");
    }
    alloc
}

/// Split a side between living grandparents and living uncles/aunts.
/// Representation stops here: children of a deceased uncle take nothing.
fn distribute_grandparent_side(parent: &FamilyNode, amount: u64, alloc: &mut Allocation) -> u64 {
    let grandparents: Vec<&Person> = parent
        .parents
        .values()
        .filter(|gp| gp.is_alive())
        .map(|gp| &gp.person)
        .collect();
    let uncles: Vec<&Person> = parent
        .parents
        .values()
        .flat_map(|gp| gp.children.iter())
        .filter(|child| child.id() != parent.id() && child.is_alive())
        .map(|child| &child.person)
        .collect();

    let groups: Vec<&[&Person]> = [grandparents.as_slice(), uncles.as_slice()]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();
    if groups.is_empty() {
        return 0;
    }
    let halves = split_evenly(amount, groups.len());
    for (group, half) in groups.into_iter().zip(halves) {
        for (person, part) in group.iter().zip(split_evenly(half, group.len())) {
            alloc.assign(person, part);
        }
    }
    amount
}

// ---------------------------------------------------------------------------
// Side split
// ---------------------------------------------------------------------------

/// How the observed reference split treats a degree when only one parent
/// node exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoneSide {
    /// Keep a half per side regardless (second degree).
    KeepsHalf,
    /// The only present side takes the whole amount (third degree).
    TakesAll,
}

/// Decide which parent sides take part and how much each receives.
///
/// Under [`VacantSidePolicy::AccrueToOtherSide`] only sides for which
/// `has_heir` holds take part, sharing `amount` between them. Under
/// [`VacantSidePolicy::LeaveUndistributed`] present sides are split per
/// `lone_side` and a side without heirs keeps its portion unassigned.
fn side_amounts<'n>(
    root: &'n FamilyNode,
    amount: u64,
    policy: VacantSidePolicy,
    lone_side: LoneSide,
    has_heir: impl Fn(&FamilyNode) -> bool,
) -> Vec<(ParentType, &'n FamilyNode, u64)> {
    let present: Vec<(ParentType, &'n FamilyNode)> = ParentType::ALL
        .iter()
        .filter_map(|&side| root.parent(side).map(|parent| (side, parent)))
        .collect();

    let taking_part: Vec<(ParentType, &'n FamilyNode)> = match policy {
        VacantSidePolicy::AccrueToOtherSide => present
            .into_iter()
            .filter(|(_, parent)| has_heir(parent))
            .collect(),
        VacantSidePolicy::LeaveUndistributed => present,
    };

    let shares: Vec<u64> = match (policy, lone_side) {
        (VacantSidePolicy::LeaveUndistributed, LoneSide::KeepsHalf) => {
            let halves = split_evenly(amount, ParentType::ALL.len());
            taking_part
                .iter()
                .map(|(side, _)| halves[side_index(*side)])
                .collect()
        }
        _ => split_evenly(amount, taking_part.len()),
    };

    taking_part
        .into_iter()
        .zip(shares)
        .map(|((side, parent), part)| (side, parent, part))
        .collect()
}

fn side_index(side: ParentType) -> usize {
    match side {
        ParentType::Mother => 0,
        ParentType::Father => 1,
    }
}
