//! # heir-core
//! Family tree model and statutory share distribution for Heirloom.
//!
//! All monetary values are integer cents; see [`constants`].

pub mod allocation;
pub mod calculator;
pub mod constants;
pub mod degree;
pub mod distribution;
pub mod error;
pub mod relation;
pub mod search;
pub mod split;
pub mod summary;
pub mod traits;
pub mod types;

pub use allocation::Allocation;
pub use calculator::{Calculation, CalculatorConfig, InheritanceCalculator, VacantSidePolicy};
pub use degree::Degree;
pub use error::{EstateError, InheritanceError, TreeError};
pub use relation::Relation;
pub use summary::HeirSummary;
pub use traits::EstateCalculator;
pub use types::{FamilyNode, FamilyTree, MarriageInfo, ParentType, Person};
