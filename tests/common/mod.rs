//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test recipe root
///
/// Creates a temporary directory for recipes and provides utilities for
/// setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the recipe root
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new recipe root in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the recipe root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the recipe root
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a recipe with the given build and run requirements
    pub fn create_recipe(&self, name: &str, build: &[&str], run: &[&str]) {
        let mut meta = format!("package:\n  name: {name}\n  version: 1.0\n\nrequirements:\n");
        for (section, specs) in [("build", build), ("run", run)] {
            meta.push_str(&format!("  {section}:\n"));
            for spec in specs {
                meta.push_str(&format!("    - {spec}\n"));
            }
        }
        meta.push_str("\nabout:\n  summary: test recipe\n");
        self.create_file(&format!("{name}/meta.yaml"), &meta);
    }

    /// Check if a file exists in the recipe root
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the recipe root
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run recipe-ci against this recipe root
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_recipe-ci"))
            .arg("--recipes")
            .arg(self.path())
            .args(args)
            .env_remove("RECIPE_CI_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute recipe-ci")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard output of a command as a string
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Standard error of a command as a string
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
