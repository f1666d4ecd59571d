//! Family tree types: persons, nodes, and the tree rooted at the decedent.
//!
//! All monetary values are in cents. A [`FamilyNode`] owns its children and
//! its parent subtrees exclusively; the tree is a strict hierarchy. A parent
//! subtree may repeat the node it hangs from among its children.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Which side of the family a parent subtree represents.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ParentType {
    Mother,
    Father,
}

impl ParentType {
    pub const ALL: [ParentType; 2] = [ParentType::Mother, ParentType::Father];

    /// The side label used by relation names ("maternal" / "paternal").
    pub fn side_label(&self) -> &'static str {
        match self {
            Self::Mother => "maternal",
            Self::Father => "paternal",
        }
    }
}

impl fmt::Display for ParentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mother => f.write_str("mother"),
            Self::Father => f.write_str("father"),
        }
    }
}

impl FromStr for ParentType {
    type Err = TreeError;

    /// Case-insensitive parse of `mother` / `father`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mother" => Ok(Self::Mother),
            "father" => Ok(Self::Father),
            _ => Err(TreeError::UnknownParentType(s.to_string())),
        }
    }
}

/// Marriage metadata. Distinguishes half-blood lineages when a tree models
/// several marriages; it does not change any share.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarriageInfo {
    /// 1-based rank of the marriage.
    pub marriage_order: u32,
    /// Whether this is the marriage producing the surviving spouse.
    pub is_current: bool,
}

impl Default for MarriageInfo {
    fn default() -> Self {
        Self {
            marriage_order: 1,
            is_current: true,
        }
    }
}

fn alive() -> bool {
    true
}

/// A single individual in the tree.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    /// Identifier, unique within a tree.
    pub id: String,
    pub name: String,
    #[serde(default = "alive")]
    pub is_alive: bool,
    /// Back-reference to the parent's id. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_info: Option<MarriageInfo>,
    /// Assigned share in cents. Zeroed at the start of every calculation.
    #[serde(default)]
    pub share: u64,
    /// Percentage of the total distributed. Derived from `share`.
    #[serde(default)]
    pub share_percentage: f64,
}

impl Person {
    /// A living person with no share.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_alive: true,
            parent_id: None,
            marriage_info: None,
            share: 0,
            share_percentage: 0.0,
        }
    }

    /// Mark as deceased.
    pub fn deceased(mut self) -> Self {
        self.is_alive = false;
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_marriage(mut self, marriage_order: u32, is_current: bool) -> Self {
        self.marriage_info = Some(MarriageInfo {
            marriage_order,
            is_current,
        });
        self
    }

    fn reset_share(&mut self) {
        self.share = 0;
        self.share_percentage = 0.0;
    }
}

/// A position in the tree: one occupant, their descendants, and their
/// ascendants by side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FamilyNode {
    pub person: Person,
    /// The decedent's spouse. Only meaningful at the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<Person>,
    #[serde(default)]
    pub children: Vec<FamilyNode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parents: BTreeMap<ParentType, FamilyNode>,
}

impl FamilyNode {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            spouse: None,
            children: Vec::new(),
            parents: BTreeMap::new(),
        }
    }

    pub fn with_spouse(mut self, spouse: Person) -> Self {
        self.spouse = Some(spouse);
        self
    }

    pub fn with_child(mut self, child: FamilyNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = FamilyNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_parent(mut self, side: ParentType, parent: FamilyNode) -> Self {
        self.parents.insert(side, parent);
        self
    }

    pub fn id(&self) -> &str {
        &self.person.id
    }

    pub fn is_alive(&self) -> bool {
        self.person.is_alive
    }

    pub fn parent(&self, side: ParentType) -> Option<&FamilyNode> {
        self.parents.get(&side)
    }

    /// Visit every person held by this subtree: occupant, spouse, children
    /// and parent subtrees, depth-first.
    ///
    /// A parent subtree may list the node it was reached from among its own
    /// children (the decedent under their mother, the mother under her
    /// father). Such a back-reference is skipped with everything below it,
    /// so each person is visited once.
    pub fn for_each_person<'a>(&'a self, f: &mut impl FnMut(&'a Person)) {
        self.visit(None, f);
    }

    /// Mutable counterpart of [`for_each_person`](Self::for_each_person).
    pub fn for_each_person_mut(&mut self, f: &mut impl FnMut(&mut Person)) {
        self.visit_mut(None, f);
    }

    /// Whether `self` sits in a parent subtree of `from` and repeats it.
    fn is_back_reference(&self, from: Option<&str>) -> bool {
        from == Some(self.id())
    }

    fn visit<'a>(&'a self, from: Option<&str>, f: &mut impl FnMut(&'a Person)) {
        f(&self.person);
        if let Some(spouse) = &self.spouse {
            f(spouse);
        }
        for child in self.children.iter().filter(|c| !c.is_back_reference(from)) {
            child.visit(None, f);
        }
        for parent in self.parents.values() {
            parent.visit(Some(self.id()), f);
        }
    }

    fn visit_mut(&mut self, from: Option<&str>, f: &mut impl FnMut(&mut Person)) {
        f(&mut self.person);
        if let Some(spouse) = &mut self.spouse {
            f(spouse);
        }
        for child in self.children.iter_mut().filter(|c| !c.is_back_reference(from)) {
            child.visit_mut(None, f);
        }
        let id = self.person.id.as_str();
        for parent in self.parents.values_mut() {
            parent.visit_mut(Some(id), f);
        }
    }

    /// Every occupant, back-references included.
    fn visit_all_mut(&mut self, f: &mut impl FnMut(&mut Person)) {
        f(&mut self.person);
        if let Some(spouse) = &mut self.spouse {
            f(spouse);
        }
        for child in &mut self.children {
            child.visit_all_mut(f);
        }
        for parent in self.parents.values_mut() {
            parent.visit_all_mut(f);
        }
    }
}

/// The whole tree, rooted at the decedent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FamilyTree {
    pub root: FamilyNode,
}

impl FamilyTree {
    pub fn new(root: FamilyNode) -> Self {
        Self { root }
    }

    /// The decedent.
    pub fn decedent(&self) -> &Person {
        &self.root.person
    }

    pub fn spouse(&self) -> Option<&Person> {
        self.root.spouse.as_ref()
    }

    /// Check structural invariants: every id non-empty and unique.
    /// Back-references into a parent subtree are not duplicates.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut result = Ok(());
        self.root.for_each_person(&mut |p| {
            if result.is_err() {
                return;
            }
            if p.id.trim().is_empty() {
                result = Err(TreeError::EmptyPersonId);
            } else if !seen.insert(p.id.as_str()) {
                result = Err(TreeError::DuplicatePersonId(p.id.clone()));
            }
        });
        result
    }

    /// Zero every share and percentage in the tree, back-references
    /// included.
    pub fn reset_shares(&mut self) {
        self.root.visit_all_mut(&mut Person::reset_share);
    }

    /// Look up a person anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&Person> {
        let mut found = None;
        self.root.for_each_person(&mut |p| {
            if found.is_none() && p.id == id {
                found = Some(p);
            }
        });
        found
    }

    pub fn person_count(&self) -> usize {
        let mut count = 0;
        self.root.for_each_person(&mut |_| count += 1);
        count
    }

    /// Sum of every assigned share, in cents.
    pub fn total_shares(&self) -> u64 {
        let mut total = 0u64;
        self.root
            .for_each_person(&mut |p| total = total.saturating_add(p.share));
        total
    }
}
