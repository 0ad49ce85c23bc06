//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;
    use proptest::sample::Index;

    use crate::core::package::{Package, Requirements};

    /// Generate a valid package group
    pub fn group() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("android".to_string()),
            Just("pip".to_string()),
            Just("ios".to_string()),
        ]
    }

    /// Generate a recipe directory name (`<group>-<name>`)
    pub fn package_name() -> impl Strategy<Value = String> {
        (group(), "[a-z][a-z0-9]{0,12}").prop_map(|(group, name)| format!("{group}-{name}"))
    }

    /// Generate a requirement on something outside the package set
    pub fn external_requirement() -> impl Strategy<Value = String> {
        ("[a-z]{3,8}", prop::option::of("[0-9]\\.[0-9]"))
            .prop_map(|(name, version)| match version {
                Some(version) => format!("ext{name} >={version}"),
                None => format!("ext{name}"),
            })
    }

    /// Generate a dependency-acyclic package set
    ///
    /// Package `i` may only depend on packages with a larger index, mixed
    /// with external requirements and version constraints.
    pub fn acyclic_packages() -> impl Strategy<Value = Vec<Package>> {
        let edge = (any::<Index>(), any::<bool>(), any::<bool>());
        let spec = (
            prop::collection::vec(edge, 0..4),
            prop::collection::vec(external_requirement(), 0..3),
        );

        prop::collection::vec(spec, 1..12).prop_map(|specs| {
            let count = specs.len();
            let name = |i: usize| {
                let group = if i % 2 == 0 { "android" } else { "pip" };
                format!("{group}-pkg{i}")
            };

            specs
                .into_iter()
                .enumerate()
                .map(|(i, (edges, externals))| {
                    let mut requirements = Requirements::default();
                    requirements.build.extend(externals);

                    let remaining = count - i - 1;
                    if remaining > 0 {
                        for (index, is_run, versioned) in edges {
                            let target = name(i + 1 + index.index(remaining));
                            let spec = if versioned {
                                format!("{target} >=1.0")
                            } else {
                                target
                            };
                            if is_run {
                                requirements.run.push(spec);
                            } else {
                                requirements.build.push(spec);
                            }
                        }
                    }

                    Package::new(name(i), requirements)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    use crate::core::package::Package;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(name.contains('-'));
            prop_assert!(["android", "pip", "ios"].contains(&Package::group_of(&name)));
        }

        #[test]
        fn test_acyclic_packages_only_point_forward(packages in acyclic_packages()) {
            let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
            for (i, package) in packages.iter().enumerate() {
                for spec in package.requirements.build.iter().chain(&package.requirements.run) {
                    let token = spec.split_whitespace().next().unwrap_or_default();
                    if let Some(position) = names.iter().position(|n| *n == token) {
                        prop_assert!(position > i);
                    }
                }
            }
        }
    }
}
