//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::{Commands, Context};
use output::OutputConfig;

/// recipe-ci - CI job graph generator for recipe build farms
///
/// Scan a directory of package recipes and generate a CI workflow with one
/// job per package, ordered by their dependencies.
#[derive(Parser, Debug)]
#[command(name = "recipe-ci")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Recipe root directory
    #[arg(short = 'C', long, global = true, default_value = ".", env = "RECIPE_CI_ROOT")]
    pub recipes: PathBuf,

    /// Generator config file (defaults to <recipes>/recipe-ci.toml)
    #[arg(long, global = true, env = "RECIPE_CI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output preferences selected by the global flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.json, self.verbose)
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = self.output_config();
        if let Some(cmd) = self.command {
            let context = Context {
                recipes: self.recipes,
                config: self.config,
                output,
            };
            cmd.run(&context)
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
