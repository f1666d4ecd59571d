//! Scenario and property test suite for Heirloom.
//!
//! Integration tests live under `tests/`; [`helpers`] holds the tree
//! builders they share.

pub mod helpers;
