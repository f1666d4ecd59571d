//! Error types for Heirloom.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("person id must not be empty")] EmptyPersonId,
    #[error("duplicate person id: {0}")] DuplicatePersonId(String),
    #[error("invalid parent type: {0} (expected mother or father)")] UnknownParentType(String),
    #[error("parent {0} given more than once")] DuplicateParent(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstateError {
    #[error("estate value must be at least one cent")] ZeroValue,
    #[error("estate value must be a finite number")] NotFinite,
    #[error("estate value must be positive, got {0}")] NotPositive(String),
    #[error("estate value too large: {0}")] TooLarge(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InheritanceError {
    #[error(transparent)] Tree(#[from] TreeError),
    #[error(transparent)] Estate(#[from] EstateError),
}
