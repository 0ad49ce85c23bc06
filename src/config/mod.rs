//! Configuration constants
//!
//! - [`defaults`] - Default generator settings and file names
//! - [`urls`] - CI action references and download URLs

pub mod defaults;
pub mod urls;
