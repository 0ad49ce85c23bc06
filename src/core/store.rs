//! Metadata store
//!
//! Holds the parsed package records of one generation run. The resolver and
//! the job builder only see the [`MetadataProvider`] trait, never the
//! filesystem.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::package::Package;
use crate::error::GraphError;

/// Source of package metadata
pub trait MetadataProvider {
    /// All known package names
    ///
    /// This is the universe dependency tokens are validated against.
    fn list_names(&self) -> BTreeSet<String>;

    /// Look up the metadata of a package
    fn load(&self, name: &str) -> Result<&Package, GraphError>;

    /// Check if a package name is known
    fn contains(&self, name: &str) -> bool {
        self.load(name).is_ok()
    }
}

/// In-memory metadata store keyed by package name
#[derive(Debug, Default, Clone)]
pub struct MetadataStore {
    packages: BTreeMap<String, Package>,
}

impl MetadataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package, replacing any previous record with the same name
    pub fn insert(&mut self, package: Package) {
        self.packages.insert(package.name.clone(), package);
    }

    /// Known package names
    pub fn known_names(&self) -> BTreeSet<String> {
        self.list_names()
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages grouped by their group label
    pub fn by_group(&self) -> BTreeMap<&str, Vec<&Package>> {
        let mut groups: BTreeMap<&str, Vec<&Package>> = BTreeMap::new();
        for package in self.packages.values() {
            groups.entry(package.group.as_str()).or_default().push(package);
        }
        groups
    }
}

impl MetadataProvider for MetadataStore {
    fn list_names(&self) -> BTreeSet<String> {
        self.packages.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Result<&Package, GraphError> {
        self.packages
            .get(name)
            .ok_or_else(|| GraphError::MissingMetadata {
                name: name.to_string(),
            })
    }

    fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }
}

impl FromIterator<Package> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut store = Self::new();
        for package in iter {
            store.insert(package);
        }
        store
    }
}
