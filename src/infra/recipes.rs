//! Recipe discovery
//!
//! Scans a recipe root for package directories named `<group>-<name>` and
//! loads their metadata into a [`MetadataStore`].

use std::fmt;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::defaults::{BUILD_SCRIPT_NAME, META_FILE_NAME};
use crate::core::config::GeneratorConfig;
use crate::core::package::Package;
use crate::core::store::MetadataStore;
use crate::error::RecipeError;
use crate::infra::filesystem;

/// Why a recipe directory was not turned into a package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The group is absent from the config or disabled
    DisabledGroup,
    /// No `meta.yaml` in the directory
    MissingMeta,
    /// Old pip recipe building into an externally managed environment
    LegacyPip,
    /// Old android recipe using the `ndk-bundle` layout
    LegacyNdk,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisabledGroup => write!(f, "group disabled"),
            Self::MissingMeta => write!(f, "no {META_FILE_NAME}"),
            Self::LegacyPip => write!(f, "legacy pip recipe"),
            Self::LegacyNdk => write!(f, "legacy ndk-bundle recipe"),
        }
    }
}

/// A recipe directory left out of the package set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecipe {
    /// Directory name
    pub name: String,
    /// Reason for skipping
    pub reason: SkipReason,
}

/// Result of scanning a recipe root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Discovered packages
    pub store: MetadataStore,
    /// Directories that were skipped, in name order
    pub skipped: Vec<SkippedRecipe>,
}

/// Scan the immediate subdirectories of `root` for recipes
pub fn scan_recipes(root: &Path, config: &GeneratorConfig) -> Result<Discovery, RecipeError> {
    let mut discovery = Discovery::default();

    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken symlink inside the root
            Err(e) if e.depth() > 0 => {
                tracing::warn!("Skipping unreadable entry in {}: {e}", root.display());
                continue;
            }
            Err(e) => {
                return Err(RecipeError::ReadDir {
                    path: root.to_path_buf(),
                    error: e.to_string(),
                });
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping non UTF-8 directory {}", entry.path().display());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        match load_recipe(entry.path(), name, config)? {
            Ok(package) => {
                tracing::debug!("Discovered {name}");
                discovery.store.insert(package);
            }
            Err(reason) => {
                tracing::debug!("Skipping {name}: {reason}");
                discovery.skipped.push(SkippedRecipe {
                    name: name.to_string(),
                    reason,
                });
            }
        }
    }

    tracing::info!(
        "Discovered {} packages ({} skipped) in {}",
        discovery.store.len(),
        discovery.skipped.len(),
        root.display()
    );

    Ok(discovery)
}

/// Load one recipe directory, or report why it is skipped
fn load_recipe(
    dir: &Path,
    name: &str,
    config: &GeneratorConfig,
) -> Result<Result<Package, SkipReason>, RecipeError> {
    if !config.is_group_enabled(Package::group_of(name)) {
        return Ok(Err(SkipReason::DisabledGroup));
    }

    let Some(meta) = filesystem::read_optional(&dir.join(META_FILE_NAME))? else {
        return Ok(Err(SkipReason::MissingMeta));
    };
    if meta.contains("externally-managed") {
        return Ok(Err(SkipReason::LegacyPip));
    }

    let build_script = filesystem::read_optional(&dir.join(BUILD_SCRIPT_NAME))?;
    if build_script.is_some_and(|script| script.contains("ndk-bundle")) {
        return Ok(Err(SkipReason::LegacyNdk));
    }

    Package::from_meta_yaml(name, &meta).map(Ok)
}
