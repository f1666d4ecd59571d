//! JSON documents exchanged with clients.
//!
//! Amounts on the wire are major units (`f64`); the core works in cents.
//! Parent maps are keyed by free-form strings on the wire and parsed into
//! [`ParentType`] here, so an unknown tag surfaces as a [`TreeError`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use heir_core::constants::{cents_to_units, to_cents};
use heir_core::{
    Calculation, Degree, FamilyNode, FamilyTree, InheritanceError, MarriageInfo, ParentType,
    Person, TreeError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn alive() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonSchema {
    pub id: String,
    pub name: String,
    #[serde(default = "alive")]
    pub is_alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_info: Option<MarriageInfo>,
    /// Ignored on input; every calculation starts from zero.
    #[serde(default)]
    pub share: f64,
    #[serde(default)]
    pub share_percentage: f64,
}

impl From<PersonSchema> for Person {
    fn from(p: PersonSchema) -> Self {
        Person {
            id: p.id,
            name: p.name,
            is_alive: p.is_alive,
            parent_id: p.parent_id,
            marriage_info: p.marriage_info,
            share: 0,
            share_percentage: 0.0,
        }
    }
}

impl From<&Person> for PersonSchema {
    fn from(p: &Person) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            is_alive: p.is_alive,
            parent_id: p.parent_id.clone(),
            marriage_info: p.marriage_info,
            share: cents_to_units(p.share),
            share_percentage: p.share_percentage,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FamilyNodeSchema {
    pub person: PersonSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<PersonSchema>,
    #[serde(default)]
    pub children: Vec<FamilyNodeSchema>,
    /// `"mother"` / `"father"` in any case; a `null` entry means unknown.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parents: BTreeMap<String, Option<FamilyNodeSchema>>,
}

impl TryFrom<FamilyNodeSchema> for FamilyNode {
    type Error = TreeError;

    fn try_from(node: FamilyNodeSchema) -> Result<Self, Self::Error> {
        let mut out = FamilyNode::new(node.person.into());
        out.spouse = node.spouse.map(Person::from);
        out.children = node
            .children
            .into_iter()
            .map(FamilyNode::try_from)
            .collect::<Result<_, _>>()?;
        for (tag, parent) in node.parents {
            let side: ParentType = tag.parse()?;
            let Some(parent) = parent else { continue };
            if out.parents.contains_key(&side) {
                return Err(TreeError::DuplicateParent(side.to_string()));
            }
            out.parents.insert(side, FamilyNode::try_from(parent)?);
        }
        Ok(out)
    }
}

impl From<&FamilyNode> for FamilyNodeSchema {
    fn from(node: &FamilyNode) -> Self {
        Self {
            person: (&node.person).into(),
            spouse: node.spouse.as_ref().map(PersonSchema::from),
            children: node.children.iter().map(Self::from).collect(),
            parents: node
                .parents
                .iter()
                .map(|(side, parent)| (side.to_string(), Some(Self::from(parent))))
                .collect(),
        }
    }
}

/// Body of `POST /calculate`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalculationRequest {
    /// Estate value in major units.
    pub estate_value: f64,
    pub family_tree: FamilyNodeSchema,
}

impl CalculationRequest {
    /// Convert into the core tree and the estate in cents.
    pub fn into_parts(self) -> Result<(FamilyTree, u64), InheritanceError> {
        let estate = to_cents(self.estate_value)?;
        let root = FamilyNode::try_from(self.family_tree)?;
        Ok((FamilyTree::new(root), estate))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SummaryEntry {
    pub name: String,
    pub relation: String,
    pub is_alive: bool,
    pub share: f64,
    pub share_percentage: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalculationResponse {
    pub estate_value: f64,
    pub total_distributed: f64,
    pub undistributed: f64,
    pub degree: Degree,
    /// The submitted tree with every share filled in.
    pub family_tree: FamilyNodeSchema,
    /// Everyone but the decedent, keyed by person id.
    pub summary: BTreeMap<String, SummaryEntry>,
}

impl From<&Calculation> for CalculationResponse {
    fn from(calc: &Calculation) -> Self {
        let summary = calc
            .summary()
            .into_iter()
            .map(|entry| {
                let row = SummaryEntry {
                    name: entry.name,
                    relation: entry.relation.label(),
                    is_alive: entry.is_alive,
                    share: cents_to_units(entry.share),
                    share_percentage: entry.share_percentage,
                };
                (entry.id, row)
            })
            .collect();
        Self {
            estate_value: cents_to_units(calc.estate),
            total_distributed: cents_to_units(calc.total_distributed),
            undistributed: cents_to_units(calc.undistributed()),
            degree: calc.degree,
            family_tree: (&calc.tree.root).into(),
            summary,
        }
    }
}

/// A tree file as accepted by the CLI: either a full request or a bare
/// root node.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum TreeDocument {
    Request(CalculationRequest),
    Tree(FamilyNodeSchema),
}

impl TreeDocument {
    /// Estate value carried by the document, if any.
    pub fn estate_value(&self) -> Option<f64> {
        match self {
            Self::Request(req) => Some(req.estate_value),
            Self::Tree(_) => None,
        }
    }

    pub fn into_tree(self) -> FamilyNodeSchema {
        match self {
            Self::Request(req) => req.family_tree,
            Self::Tree(tree) => tree,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Read and parse a tree or request document from disk.
pub fn load_document(path: &Path) -> Result<TreeDocument, LoadError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<FamilyNode, TreeError> {
        let schema: FamilyNodeSchema = serde_json::from_value(value).unwrap();
        FamilyNode::try_from(schema)
    }

    // ------------------------------------------------------------------
    // Request parsing
    // ------------------------------------------------------------------

    #[test]
    fn minimal_node_defaults() {
        let node = parse(json!({ "person": { "id": "d1", "name": "Decedent" } })).unwrap();
        assert!(node.person.is_alive);
        assert!(node.children.is_empty());
        assert!(node.parents.is_empty());
        assert!(node.spouse.is_none());
    }

    #[test]
    fn parent_tags_are_case_insensitive() {
        let node = parse(json!({
            "person": { "id": "d1", "name": "D", "is_alive": false },
            "parents": {
                "Mother": { "person": { "id": "m1", "name": "M" } },
                "FATHER": null
            }
        }))
        .unwrap();
        assert_eq!(node.parent(ParentType::Mother).unwrap().id(), "m1");
        assert!(node.parent(ParentType::Father).is_none());
    }

    #[test]
    fn unknown_parent_tag_is_rejected() {
        let err = parse(json!({
            "person": { "id": "d1", "name": "D" },
            "parents": { "uncle": { "person": { "id": "u1", "name": "U" } } }
        }))
        .unwrap_err();
        assert_eq!(err, TreeError::UnknownParentType("uncle".into()));
    }

    #[test]
    fn same_side_twice_is_rejected() {
        let err = parse(json!({
            "person": { "id": "d1", "name": "D" },
            "parents": {
                "mother": { "person": { "id": "m1", "name": "M" } },
                "Mother": { "person": { "id": "m2", "name": "M2" } }
            }
        }))
        .unwrap_err();
        assert_eq!(err, TreeError::DuplicateParent("mother".into()));
    }

    #[test]
    fn incoming_shares_are_ignored() {
        let node = parse(json!({
            "person": { "id": "d1", "name": "D", "share": 500.0, "share_percentage": 50.0 }
        }))
        .unwrap();
        assert_eq!(node.person.share, 0);
        assert_eq!(node.person.share_percentage, 0.0);
    }

    #[test]
    fn request_converts_estate_to_cents() {
        let req: CalculationRequest = serde_json::from_value(json!({
            "estate_value": 1000000.5,
            "family_tree": { "person": { "id": "d1", "name": "D" } }
        }))
        .unwrap();
        let (tree, estate) = req.into_parts().unwrap();
        assert_eq!(estate, 100_000_050);
        assert_eq!(tree.decedent().id, "d1");
    }

    #[test]
    fn non_positive_estate_is_rejected() {
        let req = CalculationRequest {
            estate_value: -5.0,
            family_tree: serde_json::from_value(json!({ "person": { "id": "d1", "name": "D" } }))
                .unwrap(),
        };
        assert!(matches!(
            req.into_parts(),
            Err(InheritanceError::Estate(heir_core::EstateError::NotPositive(_)))
        ));
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    #[test]
    fn document_accepts_request_or_bare_tree() {
        let request: TreeDocument = serde_json::from_value(json!({
            "estate_value": 10.0,
            "family_tree": { "person": { "id": "d1", "name": "D" } }
        }))
        .unwrap();
        assert_eq!(request.estate_value(), Some(10.0));

        let bare: TreeDocument =
            serde_json::from_value(json!({ "person": { "id": "d1", "name": "D" } })).unwrap();
        assert_eq!(bare.estate_value(), None);
        assert_eq!(bare.into_tree().person.id, "d1");
    }

    #[test]
    fn response_tree_uses_lowercase_parent_keys() {
        let root = FamilyNode::new(Person::new("d1", "D").deceased())
            .with_parent(ParentType::Father, FamilyNode::new(Person::new("f1", "F")));
        let schema = FamilyNodeSchema::from(&root);
        assert!(schema.parents.contains_key("father"));
    }
}
