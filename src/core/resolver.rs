//! Dependency resolution
//!
//! Computes the immediate and transitive requirements of packages,
//! restricted to the known package set.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::package::{Package, Requirements};
use crate::core::store::MetadataProvider;
use crate::error::GraphError;

/// Which requirement sections gate build ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementPolicy {
    /// Only build-time requirements
    BuildOnly,
    /// Build-time and run-time requirements
    #[default]
    BuildAndRun,
}

impl RequirementPolicy {
    /// Requirement specifiers of a package selected by this policy
    fn specifiers<'p>(self, requirements: &'p Requirements) -> impl Iterator<Item = &'p String> {
        let run: &[String] = match self {
            Self::BuildOnly => &[],
            Self::BuildAndRun => &requirements.run,
        };
        requirements.build.iter().chain(run)
    }
}

impl std::fmt::Display for RequirementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuildOnly => write!(f, "build-only"),
            Self::BuildAndRun => write!(f, "build-and-run"),
        }
    }
}

/// DFS frame: a package whose closure is in progress
#[derive(Debug)]
struct Frame {
    name: String,
    deps: Vec<String>,
    next: usize,
}

/// Dependency resolver over a metadata provider
///
/// Closures of fully explored packages are memoized for the lifetime of the
/// resolver, which is one generation run. Every package keeps its own closure
/// set, so memory grows with the sum of closure sizes (quadratic on a long
/// linear chain).
pub struct Resolver<'a, P: MetadataProvider + ?Sized> {
    provider: &'a P,
    policy: RequirementPolicy,
    known: BTreeSet<String>,
    closures: HashMap<String, Rc<BTreeSet<String>>>,
}

impl<'a, P: MetadataProvider + ?Sized> Resolver<'a, P> {
    /// Create a resolver using the given requirement policy
    pub fn new(provider: &'a P, policy: RequirementPolicy) -> Self {
        Self {
            provider,
            policy,
            known: provider.list_names(),
            closures: HashMap::new(),
        }
    }

    /// Direct dependencies of a package that are known packages
    ///
    /// Unknown tokens are external dependencies and are dropped. A package
    /// naming itself is ignored.
    pub fn immediate_requirements(&self, package: &Package) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();

        for spec in self.policy.specifiers(&package.requirements) {
            let Some(candidate) = Requirements::candidate_name(spec) else {
                continue;
            };
            if candidate == package.name {
                tracing::trace!("{}: ignoring self requirement", package.name);
            } else if self.known.contains(candidate) {
                deps.insert(candidate.to_string());
            } else {
                tracing::trace!("{}: dropping external requirement '{candidate}'", package.name);
            }
        }

        deps
    }

    /// Direct dependencies of a package looked up by name
    pub fn immediate_requirements_of(&self, name: &str) -> Result<BTreeSet<String>, GraphError> {
        let package = self.provider.load(name)?;
        Ok(self.immediate_requirements(package))
    }

    /// Full transitive closure of a package's dependencies, sorted by name
    ///
    /// Fails with [`GraphError::CyclicDependency`] when a dependency cycle is
    /// reachable from the package.
    pub fn transitive_requirements(&mut self, name: &str) -> Result<Vec<String>, GraphError> {
        let closure = self.closure(name)?;
        Ok(closure.iter().cloned().collect())
    }

    fn frame(&self, name: &str) -> Result<Frame, GraphError> {
        let package = self.provider.load(name)?;
        Ok(Frame {
            name: name.to_string(),
            deps: self.immediate_requirements(package).into_iter().collect(),
            next: 0,
        })
    }

    /// Iterative depth-first closure with gray (in progress) and black
    /// (memoized) marking
    fn closure(&mut self, root: &str) -> Result<Rc<BTreeSet<String>>, GraphError> {
        if let Some(done) = self.closures.get(root) {
            return Ok(Rc::clone(done));
        }

        let mut stack = vec![self.frame(root)?];
        let mut in_progress = HashSet::from([root.to_string()]);

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            if frame.next < frame.deps.len() {
                let dep = frame.deps[frame.next].clone();
                frame.next += 1;

                if self.closures.contains_key(&dep) {
                    continue;
                }

                if in_progress.contains(&dep) {
                    let start = stack.iter().position(|f| f.name == dep).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        stack[start..].iter().map(|f| f.name.clone()).collect();
                    cycle.push(dep);
                    tracing::debug!("cycle found: {}", cycle.join(" -> "));
                    return Err(GraphError::CyclicDependency { cycle });
                }

                in_progress.insert(dep.clone());
                let next = self.frame(&dep)?;
                stack.push(next);
                continue;
            }

            let Some(Frame { name, deps, .. }) = stack.pop() else {
                break;
            };

            let mut closure = BTreeSet::new();
            for dep in deps {
                if let Some(sub) = self.closures.get(&dep) {
                    closure.extend(sub.iter().cloned());
                }
                closure.insert(dep);
            }
            closure.remove(&name);

            in_progress.remove(&name);
            self.closures.insert(name, Rc::new(closure));
        }

        self.closures
            .get(root)
            .cloned()
            .ok_or_else(|| GraphError::MissingMetadata {
                name: root.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MetadataStore;
    use crate::test_utils::generators::{acyclic_packages, external_requirement, package_name};
    use proptest::prelude::*;

    fn pkg(name: &str, build: &[&str]) -> Package {
        Package::new(name, Requirements::new(build.iter().copied(), Vec::<String>::new()))
    }

    fn store(packages: Vec<Package>) -> MetadataStore {
        packages.into_iter().collect()
    }

    #[test]
    fn test_immediate_filters_unknown() {
        let store = store(vec![
            pkg("android-base", &[]),
            pkg("android-util", &["android-base >=1.0", "python", "make"]),
        ]);
        let resolver = Resolver::new(&store, RequirementPolicy::default());
        let deps = resolver.immediate_requirements_of("android-util").unwrap();
        assert_eq!(deps, BTreeSet::from(["android-base".to_string()]));
    }

    #[test]
    fn test_immediate_includes_run_by_default() {
        let store = store(vec![
            pkg("pip-six", &[]),
            pkg("pip-base", &[]),
            Package::new("pip-app", Requirements::new(["pip-base"], ["pip-six"])),
        ]);
        let resolver = Resolver::new(&store, RequirementPolicy::BuildAndRun);
        let deps = resolver.immediate_requirements_of("pip-app").unwrap();
        assert_eq!(deps.len(), 2);
        assert!(deps.contains("pip-six"));
    }

    #[test]
    fn test_build_only_policy_skips_run() {
        let store = store(vec![
            pkg("pip-six", &[]),
            pkg("pip-base", &[]),
            Package::new("pip-app", Requirements::new(["pip-base"], ["pip-six"])),
        ]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::BuildOnly);
        assert_eq!(resolver.transitive_requirements("pip-app").unwrap(), vec!["pip-base"]);
    }

    #[test]
    fn test_duplicate_requirements_collapse() {
        let store = store(vec![
            pkg("android-base", &[]),
            Package::new(
                "android-util",
                Requirements::new(["android-base", "android-base >=1"], ["android-base"]),
            ),
        ]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        assert_eq!(
            resolver.transitive_requirements("android-util").unwrap(),
            vec!["android-base"]
        );
    }

    #[test]
    fn test_transitive_chain_sorted() {
        let store = store(vec![pkg("A", &["B"]), pkg("B", &["C"]), pkg("C", &[])]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        assert_eq!(resolver.transitive_requirements("A").unwrap(), vec!["B", "C"]);
        assert_eq!(resolver.transitive_requirements("B").unwrap(), vec!["C"]);
        assert!(resolver.transitive_requirements("C").unwrap().is_empty());
    }

    #[test]
    fn test_transitive_diamond() {
        let store = store(vec![
            pkg("app", &["left", "right"]),
            pkg("left", &["base"]),
            pkg("right", &["base"]),
            pkg("base", &[]),
        ]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        assert_eq!(
            resolver.transitive_requirements("app").unwrap(),
            vec!["base", "left", "right"]
        );
    }

    #[test]
    fn test_two_node_cycle() {
        let store = store(vec![pkg("A", &["B"]), pkg("B", &["A"])]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        let err = resolver.transitive_requirements("A").unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicDependency {
                cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()]
            }
        );
        assert!(matches!(
            resolver.transitive_requirements("B"),
            Err(GraphError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_cycle_below_root() {
        let store = store(vec![
            pkg("app", &["x"]),
            pkg("x", &["y"]),
            pkg("y", &["z"]),
            pkg("z", &["x"]),
        ]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        let err = resolver.transitive_requirements("app").unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicDependency {
                cycle: ["x", "y", "z", "x"].iter().map(ToString::to_string).collect()
            }
        );
    }

    #[test]
    fn test_self_requirement_ignored() {
        let store = store(vec![pkg("pip-self", &["pip-self", "pip-base"]), pkg("pip-base", &[])]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        assert_eq!(resolver.transitive_requirements("pip-self").unwrap(), vec!["pip-base"]);
    }

    #[test]
    fn test_unknown_root() {
        let store = store(vec![pkg("A", &[])]);
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());
        assert_eq!(
            resolver.transitive_requirements("missing").unwrap_err(),
            GraphError::MissingMetadata {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_long_chain_shares_memoized_closures() {
        let count = 2_000;
        let name = |i: usize| format!("pip-chain{i}");
        let store: MetadataStore = (0..count)
            .map(|i| {
                let deps: Vec<String> = if i + 1 < count { vec![name(i + 1)] } else { vec![] };
                Package::new(name(i), Requirements::new(deps, Vec::<String>::new()))
            })
            .collect();
        let mut resolver = Resolver::new(&store, RequirementPolicy::default());

        assert_eq!(resolver.transitive_requirements(&name(0)).unwrap().len(), count - 1);
        assert_eq!(resolver.closures.len(), count);

        let first = resolver.closure(&name(1)).unwrap();
        let second = resolver.closure(&name(1)).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(RequirementPolicy::BuildOnly.to_string(), "build-only");
        assert_eq!(RequirementPolicy::default().to_string(), "build-and-run");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_transitive_is_deterministic(packages in acyclic_packages()) {
            let store = store(packages);
            for name in store.known_names() {
                let first = Resolver::new(&store, RequirementPolicy::default())
                    .transitive_requirements(&name)
                    .unwrap();
                let second = Resolver::new(&store, RequirementPolicy::default())
                    .transitive_requirements(&name)
                    .unwrap();
                prop_assert_eq!(&first, &second);
                let mut sorted = first.clone();
                sorted.sort();
                prop_assert_eq!(first, sorted);
            }
        }

        #[test]
        fn prop_transitive_is_closed(packages in acyclic_packages()) {
            let store = store(packages);
            let known = store.known_names();
            let mut resolver = Resolver::new(&store, RequirementPolicy::default());

            for name in &known {
                let closure: BTreeSet<String> =
                    resolver.transitive_requirements(name).unwrap().into_iter().collect();

                prop_assert!(!closure.contains(name));
                prop_assert!(closure.is_subset(&known));

                let immediate = resolver.immediate_requirements_of(name).unwrap();
                prop_assert!(immediate.is_subset(&closure));

                for dep in &closure {
                    let dep_immediate = resolver.immediate_requirements_of(dep).unwrap();
                    prop_assert!(dep_immediate.is_subset(&closure));
                }
            }
        }

        #[test]
        fn prop_unknown_tokens_are_dropped(
            packages in acyclic_packages(),
            externals in prop::collection::vec(external_requirement(), 1..5),
            name in package_name(),
        ) {
            let mut store = store(packages);
            prop_assume!(!store.contains(&name));

            let target = store.known_names().into_iter().next().unwrap();
            let mut build = externals;
            build.push(name.clone());
            store.insert(Package::new(name.clone(), Requirements::new(build, [target.clone()])));

            let mut resolver = Resolver::new(&store, RequirementPolicy::default());
            let immediate = resolver.immediate_requirements_of(&name).unwrap();
            prop_assert_eq!(immediate, BTreeSet::from([target.clone()]));

            let needs = resolver.transitive_requirements(&name).unwrap();
            prop_assert!(needs.contains(&target));
            prop_assert!(needs.iter().all(|dep| store.contains(dep) && *dep != name));
        }
    }
}
