//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod generate;
pub mod list;
pub mod needs;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;

use crate::cli::output::{create_spinner, OutputConfig};
use crate::config::defaults::CONFIG_FILE_NAME;
use crate::core::config::GeneratorConfig;
use crate::core::jobs::{JobGraph, JobGraphBuilder};
use crate::error::CiError;
use crate::infra::recipes::{self, Discovery};
use crate::render::OutputFormat;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the CI workflow for all recipes
    Generate {
        /// Output path (defaults to <recipes>/.github/workflows/ci.yml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Github)]
        format: OutputFormat,
    },

    /// Show the jobs a package needs
    Needs {
        /// Package name
        package: String,

        /// Show only direct dependencies
        #[arg(long)]
        immediate: bool,
    },

    /// Validate the dependency graph without writing anything
    Check,

    /// List discovered packages by group
    List,
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Recipe root directory
    pub recipes: PathBuf,
    /// Explicit config file path
    pub config: Option<PathBuf>,
    /// Output preferences
    pub output: OutputConfig,
}

impl Context {
    /// Path of the generator config file
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.recipes.join(CONFIG_FILE_NAME))
    }
}

/// Generator config and discovered recipes of one run
#[derive(Debug)]
pub struct Project {
    /// Generator configuration
    pub config: GeneratorConfig,
    /// Discovered packages
    pub discovery: Discovery,
}

impl Project {
    /// Build the job graph of every discovered package
    pub fn build_graph(&self) -> Result<JobGraph, CiError> {
        let graph = JobGraphBuilder::new(&self.discovery.store, &self.config).build_all()?;
        Ok(graph)
    }
}

/// Load the generator config and scan the recipe root
pub fn load_project(context: &Context) -> Result<Project> {
    if !context.recipes.is_dir() {
        return Err(CiError::RecipesNotFound {
            path: context.recipes.clone(),
        }
        .into());
    }

    let config_path = context.config_path();
    let config = GeneratorConfig::load_from_path(&config_path)
        .map_err(CiError::from)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let discovery = scan(&context.recipes, &config, &context.output)?;
    Ok(Project { config, discovery })
}

fn scan(root: &Path, config: &GeneratorConfig, output: &OutputConfig) -> Result<Discovery> {
    let spinner = create_spinner(&format!("Scanning recipes in {}", root.display()), output);
    let discovery = recipes::scan_recipes(root, config).map_err(CiError::from);
    spinner.finish_and_clear();
    discovery.with_context(|| format!("Failed to scan recipes in {}", root.display()))
}

impl Commands {
    /// Execute the command
    pub fn run(self, context: &Context) -> Result<()> {
        match self {
            Self::Generate {
                output,
                stdout,
                format,
            } => {
                let options = generate::GenerateOptions {
                    output,
                    stdout,
                    format,
                };
                generate::execute(context, &options)
            }
            Self::Needs { package, immediate } => needs::execute(context, &package, immediate),
            Self::Check => check::execute(context),
            Self::List => list::execute(context),
        }
    }
}
