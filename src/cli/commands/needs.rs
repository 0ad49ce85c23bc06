//! CLI command for displaying the needs of a package
//!
//! Implements the `recipe-ci needs` command.

use anyhow::Result;

use crate::cli::commands::{load_project, Context};
use crate::core::resolver::Resolver;
use crate::error::CiError;

/// Execute the needs command
pub fn execute(context: &Context, package: &str, immediate: bool) -> Result<()> {
    let project = load_project(context)?;
    let mut resolver = Resolver::new(
        &project.discovery.store,
        project.config.requirement_policy,
    );

    let needs: Vec<String> = if immediate {
        resolver
            .immediate_requirements_of(package)
            .map(|deps| deps.into_iter().collect())
    } else {
        resolver.transitive_requirements(package)
    }
    .map_err(CiError::from)?;

    if context.output.json {
        println!("{}", serde_json::to_string_pretty(&needs)?);
    } else {
        for name in &needs {
            println!("{name}");
        }
    }

    Ok(())
}
