//! Infrastructure layer
//!
//! Handles filesystem access: recipe discovery and reading/writing files.
//! This module is the only place where side effects occur.

pub mod filesystem;
pub mod recipes;
