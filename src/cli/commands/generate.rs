//! Generate command implementation
//!
//! Implements `recipe-ci generate`.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::commands::{load_project, Context};
use crate::config::defaults::WORKFLOW_PATH;
use crate::error::CiError;
use crate::infra::filesystem;
use crate::render::{github, json, OutputFormat};

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output path override
    pub output: Option<PathBuf>,
    /// Print instead of writing a file
    pub stdout: bool,
    /// Output format
    pub format: OutputFormat,
}

/// Execute the generate command
pub fn execute(context: &Context, options: &GenerateOptions) -> Result<()> {
    let project = load_project(context)?;

    let graph = project.build_graph().context("Failed to build job graph")?;

    let rendered = match options.format {
        OutputFormat::Github => github::render_workflow(&graph, &project.config),
        OutputFormat::Json => json::render_graph(&graph),
    }
    .map_err(CiError::from)?;

    if options.stdout {
        print!("{rendered}");
        return Ok(());
    }

    let path = options
        .output
        .clone()
        .unwrap_or_else(|| context.recipes.join(WORKFLOW_PATH));
    filesystem::write_file(&path, &rendered).map_err(CiError::from)?;
    tracing::info!("Wrote {}", path.display());

    if context.output.json {
        let summary = serde_json::json!({
            "output": path.display().to_string(),
            "jobs": graph.len(),
            "skipped": project.discovery.skipped.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        context.output.success(&format!(
            "Wrote {} jobs to {}",
            graph.len(),
            path.display()
        ));
    }

    Ok(())
}
