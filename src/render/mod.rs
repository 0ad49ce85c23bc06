//! Job graph renderers
//!
//! Serialize the abstract [`JobGraph`](crate::core::jobs::JobGraph) into a
//! concrete output format.
//!
//! - [`github`] - GitHub Actions workflow YAML
//! - [`json`] - JSON dump of the abstract graph

pub mod github;
pub mod json;

use serde::{Deserialize, Serialize};

/// Output format of the `generate` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// GitHub Actions workflow
    #[default]
    Github,
    /// Abstract job graph as JSON
    Json,
}
