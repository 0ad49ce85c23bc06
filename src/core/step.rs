//! Abstract job steps
//!
//! Steps are plain data. Turning them into shell commands or CI actions is
//! the job of the renderers in [`crate::render`].

use serde::{Deserialize, Serialize};

/// One step of a package job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    /// Check out the recipe repository
    Checkout,

    /// Install a conda distribution for the given Python version
    SetupConda { python_version: String },

    /// Install conda-build
    InstallCondaBuild,

    /// Install OS packages
    InstallSystemPackages { packages: Vec<String> },

    /// Install a JDK
    SetupJdk { java_version: u32 },

    /// Install (or restore from cache) the Android SDK and NDK
    AndroidNdk { version: String },

    /// Download the published artifact of a dependency
    FetchArtifact { package: String, artifact: String },

    /// Rebuild the local package index after fetching artifacts
    ReindexArtifacts { path: String },

    /// Build the package recipe
    BuildRecipe {
        package: String,
        python_version: String,
    },

    /// Publish the built package as an artifact
    PublishArtifact {
        package: String,
        artifact: String,
        path: String,
    },
}

impl Step {
    /// Short kind label, matching the serialized `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::SetupConda { .. } => "setup-conda",
            Self::InstallCondaBuild => "install-conda-build",
            Self::InstallSystemPackages { .. } => "install-system-packages",
            Self::SetupJdk { .. } => "setup-jdk",
            Self::AndroidNdk { .. } => "android-ndk",
            Self::FetchArtifact { .. } => "fetch-artifact",
            Self::ReindexArtifacts { .. } => "reindex-artifacts",
            Self::BuildRecipe { .. } => "build-recipe",
            Self::PublishArtifact { .. } => "publish-artifact",
        }
    }
}
