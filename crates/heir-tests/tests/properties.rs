//! Property-based tests over randomly shaped family trees.
//!
//! Invariants checked:
//! - Conservation: with any heir, the whole estate is distributed
//! - The spouse always receives the statutory fraction of the degree
//! - Only living persons ever receive a share
//! - A sole child represented by their own sole child passes the share intact
//! - Sibling order changes shares by rounding residue only
//! - A living descendant always pushes every other line out

use heir_core::degree::classify;
use heir_core::split::fraction_of;
use heir_core::{Degree, FamilyNode, ParentType, Person, Relation, VacantSidePolicy};
use heir_tests::helpers::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn node(alive: bool) -> FamilyNode {
    let person = Person::new("x", "x");
    FamilyNode::new(if alive { person } else { person.deceased() })
}

/// A descendant line: up to four generations, up to three children each.
fn arb_line() -> BoxedStrategy<FamilyNode> {
    any::<bool>()
        .prop_map(node)
        .prop_recursive(4, 48, 3, |inner| {
            (any::<bool>(), prop::collection::vec(inner, 0..3))
                .prop_map(|(alive, children)| node(alive).with_children(children))
        })
        .boxed()
}

/// A parent of the decedent: optional siblings and optional grandparents,
/// each grandparent with optional uncle/aunt lines.
fn arb_parent() -> impl Strategy<Value = FamilyNode> {
    let grandparent = (any::<bool>(), prop::collection::vec(arb_line(), 0..3))
        .prop_map(|(alive, children)| node(alive).with_children(children))
        .boxed();
    (
        any::<bool>(),
        prop::collection::vec(arb_line(), 0..3),
        prop::option::of(grandparent.clone()),
        prop::option::of(grandparent),
    )
        .prop_map(|(alive, siblings, gm, gf)| {
            let mut parent = node(alive).with_children(siblings);
            if let Some(gm) = gm {
                parent = parent.with_parent(ParentType::Mother, gm);
            }
            if let Some(gf) = gf {
                parent = parent.with_parent(ParentType::Father, gf);
            }
            parent
        })
}

/// A decedent with optional spouse, children, and parents. Person ids are
/// unique after [`renumber`].
fn arb_tree() -> impl Strategy<Value = FamilyNode> {
    (
        prop::option::of(any::<bool>()),
        prop::collection::vec(arb_line(), 0..4),
        prop::option::of(arb_parent()),
        prop::option::of(arb_parent()),
    )
        .prop_map(|(spouse, children, mother, father)| {
            let mut root = dead("d1").with_children(children);
            if let Some(spouse_alive) = spouse {
                let spouse = Person::new("s1", "Spouse");
                root = root.with_spouse(if spouse_alive { spouse } else { spouse.deceased() });
            }
            if let Some(mother) = mother {
                root = root.with_parent(ParentType::Mother, mother);
            }
            if let Some(father) = father {
                root = root.with_parent(ParentType::Father, father);
            }
            renumber(root)
        })
}

fn arb_estate() -> impl Strategy<Value = u64> {
    1u64..=units(10_000_000)
}

/// Give every person below the root a unique id.
fn renumber(mut root: FamilyNode) -> FamilyNode {
    let mut next = 0usize;
    for child in &mut root.children {
        child.for_each_person_mut(&mut |p| {
            p.id = format!("p{next}");
            next += 1;
        });
    }
    for parent in root.parents.values_mut() {
        parent.for_each_person_mut(&mut |p| {
            p.id = format!("p{next}");
            next += 1;
        });
    }
    root
}

/// Reverse every child list in the tree.
fn reverse_children(node: &mut FamilyNode) {
    node.children.reverse();
    for child in &mut node.children {
        reverse_children(child);
    }
    for parent in node.parents.values_mut() {
        reverse_children(parent);
    }
}

fn spouse_alive(root: &FamilyNode) -> bool {
    root.spouse.as_ref().is_some_and(|s| s.is_alive)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn estate_is_conserved_when_anyone_inherits(root in arb_tree(), estate in arb_estate()) {
        let has_heir = classify(&root) != Degree::None || spouse_alive(&root);
        let calc = run_with(root, estate, VacantSidePolicy::AccrueToOtherSide);
        let expected = if has_heir { estate } else { 0 };
        prop_assert_eq!(calc.total_distributed, expected);
        prop_assert_eq!(calc.tree.total_shares(), expected);
        prop_assert_eq!(calc.allocation.total(), expected);
    }

    #[test]
    fn retained_sides_never_overdistribute(root in arb_tree(), estate in arb_estate()) {
        let calc = run_with(root, estate, VacantSidePolicy::LeaveUndistributed);
        prop_assert!(calc.total_distributed <= estate);
        prop_assert_eq!(calc.tree.total_shares(), calc.total_distributed);
    }

    #[test]
    fn spouse_receives_statutory_fraction(root in arb_tree(), estate in arb_estate()) {
        let with_spouse = spouse_alive(&root);
        let calc = run_with(root, estate, VacantSidePolicy::default());
        let (num, den) = calc.degree.spouse_fraction();
        let expected = if with_spouse { fraction_of(estate, num, den) } else { 0 };
        prop_assert_eq!(calc.spouse_share, expected);
        if with_spouse {
            prop_assert_eq!(share(&calc, "s1"), expected);
        }
    }

    #[test]
    fn only_the_living_inherit(root in arb_tree(), estate in arb_estate()) {
        let calc = run_with(root, estate, VacantSidePolicy::default());
        for heir in calc.heirs() {
            prop_assert!(heir.is_alive, "deceased {} received {}", heir.id, heir.share);
        }
        prop_assert_eq!(share(&calc, "d1"), 0);
    }

    #[test]
    fn sole_representative_takes_whole_branch(
        others in prop::collection::vec(arb_line(), 0..4),
        with_spouse in any::<bool>(),
        estate in arb_estate(),
    ) {
        let build = |target: FamilyNode| {
            let mut root = decedent(with_spouse).with_child(target);
            root.children.extend(others.iter().cloned());
            renumber(root)
        };
        // Renumbering visits the target first, so its id is stable.
        let direct = run_with(build(alive("t")), estate, VacantSidePolicy::default());
        let represented = run_with(
            build(dead("t").with_child(alive("g"))),
            estate,
            VacantSidePolicy::default(),
        );
        prop_assert_eq!(share(&represented, "p1"), share(&direct, "p0"));
        prop_assert_eq!(share(&represented, "p0"), 0);
    }

    #[test]
    fn child_order_only_moves_rounding_residue(root in arb_tree(), estate in arb_estate()) {
        let mut reversed = root.clone();
        reverse_children(&mut reversed);
        let a = run_with(root, estate, VacantSidePolicy::default());
        let b = run_with(reversed, estate, VacantSidePolicy::default());
        prop_assert_eq!(a.degree, b.degree);
        prop_assert_eq!(a.total_distributed, b.total_distributed);
        for (id, amount) in a.allocation.iter() {
            let other = b.allocation.get(id);
            prop_assert!(amount.abs_diff(other) <= 32, "{}: {} vs {}", id, amount, other);
        }
    }

    #[test]
    fn living_descendant_excludes_other_lines(root in arb_tree(), estate in arb_estate()) {
        let root = root.with_child(alive("newborn"));
        let calc = run_with(root, estate, VacantSidePolicy::default());
        prop_assert_eq!(calc.degree, Degree::First);
        for heir in calc.heirs() {
            prop_assert!(
                matches!(heir.relation, Relation::Spouse | Relation::Descendant { .. }),
                "{} ({}) inherited alongside descendants",
                heir.id,
                heir.relation
            );
        }
    }
}
