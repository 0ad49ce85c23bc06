//! Check command implementation
//!
//! Implements `recipe-ci check` to validate the dependency graph without
//! writing a workflow.

use anyhow::{Context as _, Result};

use crate::cli::commands::{load_project, Context};

/// Execute the check command
pub fn execute(context: &Context) -> Result<()> {
    let project = load_project(context)?;
    let store = &project.discovery.store;

    tracing::info!(
        "Checking {} packages with policy {}",
        store.len(),
        project.config.requirement_policy
    );

    let graph = project
        .build_graph()
        .context("Dependency graph is invalid")?;

    let roots = graph.roots().count();
    let edges: usize = graph.iter().map(|job| job.needs.len()).sum();

    if context.output.json {
        let summary = serde_json::json!({
            "packages": store.len(),
            "jobs": graph.len(),
            "roots": roots,
            "needs": edges,
            "skipped": project.discovery.skipped.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        context.output.success(&format!(
            "{} jobs, {roots} without dependencies, {edges} needs edges",
            graph.len()
        ));
    }

    Ok(())
}
