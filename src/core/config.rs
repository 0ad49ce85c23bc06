//! Generator configuration
//!
//! Reads `recipe-ci.toml` from the recipe root. The file is optional; every
//! setting has a default matching the build farm's standard runners.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    ANDROID_SYSTEM_PACKAGES, DEFAULT_ARTIFACT_ROOT, DEFAULT_JAVA_VERSION, DEFAULT_NDK_VERSION,
    DEFAULT_PYTHON_VERSION, DEFAULT_RUNS_ON, DEFAULT_WORKFLOW_NAME, MACOS_RUNS_ON,
};
use crate::core::resolver::RequirementPolicy;
use crate::core::step::Step;
use crate::error::ConfigError;

/// Execution environment of a package group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Whether packages of this group are discovered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Runner label, falls back to the generator default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs_on: Option<String>,

    /// Steps run after the common bootstrap
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bootstrap: Vec<Step>,
}

fn default_enabled() -> bool {
    true
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            runs_on: None,
            bootstrap: Vec::new(),
        }
    }
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Workflow display name
    pub workflow_name: String,

    /// Python version every package is built for
    pub python_version: String,

    /// conda-build output directory on the runner
    pub artifact_root: String,

    /// Runner for groups that do not name one
    pub default_runs_on: String,

    /// Which requirement sections gate build ordering
    pub requirement_policy: RequirementPolicy,

    /// Group table; replaces the default table when present
    pub groups: BTreeMap<String, GroupConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let android = GroupConfig {
            bootstrap: vec![
                Step::InstallSystemPackages {
                    packages: ANDROID_SYSTEM_PACKAGES
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                },
                Step::SetupJdk {
                    java_version: DEFAULT_JAVA_VERSION,
                },
                Step::AndroidNdk {
                    version: DEFAULT_NDK_VERSION.to_string(),
                },
            ],
            ..GroupConfig::default()
        };
        let ios = GroupConfig {
            enabled: false,
            runs_on: Some(MACOS_RUNS_ON.to_string()),
            bootstrap: Vec::new(),
        };

        Self {
            workflow_name: DEFAULT_WORKFLOW_NAME.to_string(),
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            artifact_root: DEFAULT_ARTIFACT_ROOT.to_string(),
            default_runs_on: DEFAULT_RUNS_ON.to_string(),
            requirement_policy: RequirementPolicy::default(),
            groups: BTreeMap::from([
                ("android".to_string(), android),
                ("ios".to_string(), ios),
                ("pip".to_string(), GroupConfig::default()),
            ]),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a specific path
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check if packages of a group should be discovered
    pub fn is_group_enabled(&self, group: &str) -> bool {
        self.groups.get(group).is_some_and(|g| g.enabled)
    }

    /// Names of the enabled groups
    pub fn enabled_groups(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(_, g)| g.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Runner label for a group
    pub fn runs_on(&self, group: &str) -> &str {
        self.groups
            .get(group)
            .and_then(|g| g.runs_on.as_deref())
            .unwrap_or(self.default_runs_on.as_str())
    }

    /// Group-specific bootstrap steps
    pub fn bootstrap(&self, group: &str) -> &[Step] {
        self.groups
            .get(group)
            .map(|g| g.bootstrap.as_slice())
            .unwrap_or_default()
    }

    /// Artifact name a package is published under
    pub fn artifact_name(&self, package: &str) -> String {
        format!("{package}-{}", self.python_version)
    }

    /// Glob of the files a package build produces
    pub fn artifact_path(&self, package: &str) -> String {
        format!("{}/*/{package}*.bz2", self.artifact_root)
    }

    /// Glob of the channel directories to reindex after fetching artifacts
    pub fn reindex_path(&self) -> String {
        format!("{}/*", self.artifact_root)
    }
}
