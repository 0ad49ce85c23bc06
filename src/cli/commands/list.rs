//! List command implementation
//!
//! Implements `recipe-ci list`.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::cli::commands::{load_project, Context};
use crate::cli::output::status;

/// Execute the list command
pub fn execute(context: &Context) -> Result<()> {
    let project = load_project(context)?;
    let groups = project.discovery.store.by_group();

    if context.output.json {
        let listing: BTreeMap<&str, Vec<&str>> = groups
            .iter()
            .map(|(group, packages)| (*group, packages.iter().map(|p| p.name.as_str()).collect()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No packages found in {}", context.recipes.display());
    }

    for (group, packages) in &groups {
        println!("{group} ({}, runs on {})", packages.len(), project.config.runs_on(group));
        for package in packages {
            println!("  • {}", package.name);
        }
    }

    if context.output.verbose > 0 && !project.discovery.skipped.is_empty() {
        println!("\nSkipped:");
        for skipped in &project.discovery.skipped {
            println!("  {} {} ({})", status::WARNING, skipped.name, skipped.reason);
        }
    }

    Ok(())
}
