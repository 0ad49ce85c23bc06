//! Core business logic module
//!
//! This module contains the dependency and job graph engine.
//! Apart from loading the generator config it has NO I/O operations -
//! those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`package`] - Package records and `meta.yaml` requirement parsing
//! - [`store`] - Metadata store and provider trait
//! - [`resolver`] - Dependency resolution
//! - [`step`] - Abstract job steps
//! - [`jobs`] - Job graph construction
//! - [`config`] - Generator configuration (`recipe-ci.toml`)

pub mod config;
pub mod jobs;
pub mod package;
pub mod resolver;
pub mod step;
pub mod store;
