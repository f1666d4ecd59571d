//! Living-subtree search.
//!
//! A single traversal answers every "is anyone alive down there?" question
//! the classifier and the distribution routines ask. Only `children` edges
//! are followed; ascendant subtrees are never entered.

use crate::types::FamilyNode;

/// Parameters for [`contains_living`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Search<'a> {
    /// Whether the starting node's own occupant counts.
    pub include_root: bool,
    /// A child subtree whose occupant has this id is skipped entirely.
    pub exclude_id: Option<&'a str>,
    /// Maximum number of generations below the starting node to inspect.
    /// `None` searches to any depth.
    pub max_depth: Option<u32>,
}

impl<'a> Search<'a> {
    /// The node itself and all of its descendants.
    pub fn subtree() -> Self {
        Self {
            include_root: true,
            exclude_id: None,
            max_depth: None,
        }
    }

    /// Descendants only; the node's own occupant is ignored.
    pub fn descendants() -> Self {
        Self {
            include_root: false,
            exclude_id: None,
            max_depth: None,
        }
    }

    /// Skip the child subtree occupied by `id`.
    pub fn excluding(mut self, id: &'a str) -> Self {
        self.exclude_id = Some(id);
        self
    }

    /// Stop `generations` levels below the starting node.
    pub fn within(mut self, generations: u32) -> Self {
        self.max_depth = Some(generations);
        self
    }
}

/// Whether any living person is reachable from `node` under `search`.
pub fn contains_living(node: &FamilyNode, search: Search<'_>) -> bool {
    if search.include_root && node.is_alive() {
        return true;
    }
    walk(node, search, 1)
}

fn walk(node: &FamilyNode, search: Search<'_>, depth: u32) -> bool {
    if search.max_depth.is_some_and(|max| depth > max) {
        return false;
    }
    node.children.iter().any(|child| {
        if search.exclude_id == Some(child.id()) {
            return false;
        }
        child.is_alive() || walk(child, search, depth + 1)
    })
}

/// Children of `node` that form a valid branch: alive themselves, or
/// deceased with at least one living descendant. `exclude_id` drops one
/// child (the decedent among their own parent's children).
pub fn valid_branches<'n>(node: &'n FamilyNode, exclude_id: Option<&str>) -> Vec<&'n FamilyNode> {
    node.children
        .iter()
        .filter(|child| exclude_id != Some(child.id()))
        .filter(|child| contains_living(child, Search::subtree()))
        .collect()
}
