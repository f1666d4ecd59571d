//! Relation of every person in the tree to the decedent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{FamilyNode, FamilyTree, ParentType, Person};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relation {
    Decedent,
    Spouse,
    /// Generation 1 is a child, 2 a grandchild, and so on.
    Descendant { generation: u32 },
    Parent { side: ParentType },
    /// Generation 0 is a sibling, 1 a nephew or niece, and so on.
    SiblingLine { side: ParentType, generation: u32 },
    Grandparent { side: ParentType },
    UncleAunt { side: ParentType },
    /// Generation 1 is a first cousin.
    CousinLine { side: ParentType, generation: u32 },
    /// Generation 3 is a great-grandparent.
    Ascendant { side: ParentType, generation: u32 },
    /// Anyone else attached to the tree (in-laws, remote collaterals).
    Other,
}

fn greats(n: u32) -> String {
    "great-".repeat(n as usize)
}

impl Relation {
    /// Human-readable label, e.g. `grandchild` or `maternal uncle/aunt`.
    pub fn label(&self) -> String {
        match *self {
            Self::Decedent => "decedent".into(),
            Self::Spouse => "spouse".into(),
            Self::Descendant { generation: 1 } => "child".into(),
            Self::Descendant { generation } => {
                format!("{}grandchild", greats(generation.saturating_sub(2)))
            }
            Self::Parent { side } => side.to_string(),
            Self::SiblingLine { generation: 0, .. } => "sibling".into(),
            Self::SiblingLine { generation: 1, .. } => "nephew/niece".into(),
            Self::SiblingLine { generation, .. } => {
                format!("{}grand-nephew/niece", greats(generation.saturating_sub(2)))
            }
            Self::Grandparent { side } => format!("{} grandparent", side.side_label()),
            Self::UncleAunt { side } => format!("{} uncle/aunt", side.side_label()),
            Self::CousinLine { side, generation: 1 } => format!("{} cousin", side.side_label()),
            Self::CousinLine { side, .. } => format!("{} cousin's descendant", side.side_label()),
            Self::Ascendant { side, generation } => format!(
                "{} {}grandparent",
                side.side_label(),
                greats(generation.saturating_sub(2))
            ),
            Self::Other => "relative".into(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Every person in the tree paired with their relation, in traversal order:
/// decedent, spouse, descendants, then each parent side.
pub fn relations(tree: &FamilyTree) -> Vec<(&Person, Relation)> {
    let root = &tree.root;
    let mut out = Vec::new();
    out.push((&root.person, Relation::Decedent));
    if let Some(spouse) = &root.spouse {
        out.push((spouse, Relation::Spouse));
    }
    for child in &root.children {
        descend(child, 1, &|generation| Relation::Descendant { generation }, &mut out);
    }
    for (&side, parent) in &root.parents {
        ascend(parent, side, 1, root.id(), &mut out);
    }
    out
}

fn descend<'t>(
    node: &'t FamilyNode,
    generation: u32,
    relation: &dyn Fn(u32) -> Relation,
    out: &mut Vec<(&'t Person, Relation)>,
) {
    out.push((&node.person, relation(generation)));
    attach_others(node, out);
    for child in &node.children {
        descend(child, generation + 1, relation, out);
    }
}

fn ascend<'t>(
    node: &'t FamilyNode,
    side: ParentType,
    generation: u32,
    from_id: &str,
    out: &mut Vec<(&'t Person, Relation)>,
) {
    let relation = match generation {
        1 => Relation::Parent { side },
        2 => Relation::Grandparent { side },
        generation => Relation::Ascendant { side, generation },
    };
    out.push((&node.person, relation));
    if let Some(spouse) = &node.spouse {
        out.push((spouse, Relation::Other));
    }
    let collateral = move |depth: u32| match (generation, depth) {
        (1, depth) => Relation::SiblingLine { side, generation: depth },
        (2, 0) => Relation::UncleAunt { side },
        (2, depth) => Relation::CousinLine { side, generation: depth },
        _ => Relation::Other,
    };
    for child in node.children.iter().filter(|child| child.id() != from_id) {
        descend(child, 0, &collateral, out);
    }
    for parent in node.parents.values() {
        ascend(parent, side, generation + 1, node.id(), out);
    }
}

/// Spouses and ascendants hanging off a non-root line.
fn attach_others<'t>(node: &'t FamilyNode, out: &mut Vec<(&'t Person, Relation)>) {
    if let Some(spouse) = &node.spouse {
        out.push((spouse, Relation::Other));
    }
    for parent in node.parents.values() {
        parent.for_each_person(&mut |p| out.push((p, Relation::Other)));
    }
}
