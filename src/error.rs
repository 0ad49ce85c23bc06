//! Error types for recipe-ci
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Dependency graph errors
///
/// Both variants are fatal: a partial job graph could under-order a build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No metadata record exists for the package
    #[error("No metadata found for package '{name}'")]
    MissingMetadata { name: String },

    /// Dependency cycle detected while computing a transitive closure
    #[error("Circular dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}

/// Recipe discovery errors
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Failed to list the recipe directory
    #[error("Failed to read recipe directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to parse the requirements of a recipe
    #[error("Failed to parse requirements of '{package}': {error}")]
    Parse { package: String, error: String },

    /// Filesystem error while reading recipe files
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Generator configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: PathBuf, error: String },
}

/// Workflow rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// YAML serialization failed
    #[error("Failed to serialize workflow: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failed
    #[error("Failed to serialize job graph: {0}")]
    Json(#[from] serde_json::Error),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level recipe-ci error type
#[derive(Error, Debug)]
pub enum CiError {
    /// Recipe root does not exist
    #[error("Recipe directory not found at '{path}'")]
    RecipesNotFound { path: PathBuf },

    /// Dependency graph error
    #[error("Dependency graph error: {0}")]
    Graph(#[from] GraphError),

    /// Recipe discovery error
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Rendering error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
