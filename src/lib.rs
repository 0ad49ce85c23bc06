//! recipe-ci - CI job graph generator for recipe build farms
//!
//! This library scans a directory of package recipes, resolves the
//! dependencies between them and produces one CI job per package whose
//! `needs` list the jobs that must finish first.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Dependency resolution and job graph construction (no I/O)
//! - [`infra`] - Infrastructure layer (recipe discovery, filesystem)
//! - [`render`] - Job graph renderers (GitHub Actions, JSON)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
pub mod render;

#[cfg(test)]
pub mod test_utils;
