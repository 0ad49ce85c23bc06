//! Job graph construction
//!
//! Builds one CI job per package. A job fetches the artifacts of every
//! package in its transitive closure, reindexes them, builds the recipe and
//! publishes the result. Ordering between jobs is only declared through
//! `needs`; scheduling is left to the CI orchestrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::GeneratorConfig;
use crate::core::resolver::Resolver;
use crate::core::step::Step;
use crate::core::store::MetadataProvider;
use crate::error::GraphError;

/// CI job building one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Package name
    pub name: String,

    /// Package group
    pub group: String,

    /// Runner label
    pub runs_on: String,

    /// Jobs that must complete first, sorted by name
    pub needs: Vec<String>,

    /// Ordered steps
    pub steps: Vec<Step>,
}

impl Job {
    /// Dependencies whose artifacts this job fetches
    pub fn fetched_packages(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match step {
            Step::FetchArtifact { package, .. } => Some(package.as_str()),
            _ => None,
        })
    }
}

/// All jobs of a generation run, keyed by package name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobGraph {
    jobs: BTreeMap<String, Job>,
}

impl JobGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job
    pub fn insert(&mut self, job: Job) {
        self.jobs.insert(job.name.clone(), job);
    }

    /// Look up a job by package name
    pub fn get(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    /// Iterate jobs in name order
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// Number of jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if the graph has no jobs
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs without any `needs`, which can start immediately
    pub fn roots(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values().filter(|job| job.needs.is_empty())
    }
}

/// Builds [`Job`]s from package metadata
pub struct JobGraphBuilder<'a, P: MetadataProvider + ?Sized> {
    provider: &'a P,
    config: &'a GeneratorConfig,
    resolver: Resolver<'a, P>,
}

impl<'a, P: MetadataProvider + ?Sized> JobGraphBuilder<'a, P> {
    /// Create a builder using the configured requirement policy
    pub fn new(provider: &'a P, config: &'a GeneratorConfig) -> Self {
        Self {
            provider,
            config,
            resolver: Resolver::new(provider, config.requirement_policy),
        }
    }

    /// Steps every job starts with
    pub fn common_steps(&self) -> Vec<Step> {
        vec![
            Step::Checkout,
            Step::SetupConda {
                python_version: self.config.python_version.clone(),
            },
            Step::InstallCondaBuild,
        ]
    }

    /// Build the job of one package
    pub fn build_job(&mut self, name: &str) -> Result<Job, GraphError> {
        let provider = self.provider;
        let package = provider.load(name)?;
        let needs = self.resolver.transitive_requirements(name)?;

        let mut steps = self.common_steps();
        steps.extend_from_slice(self.config.bootstrap(&package.group));

        if !needs.is_empty() {
            steps.extend(needs.iter().map(|dep| Step::FetchArtifact {
                package: dep.clone(),
                artifact: self.config.artifact_name(dep),
            }));
            steps.push(Step::ReindexArtifacts {
                path: self.config.reindex_path(),
            });
        }

        steps.push(Step::BuildRecipe {
            package: name.to_string(),
            python_version: self.config.python_version.clone(),
        });
        steps.push(Step::PublishArtifact {
            package: name.to_string(),
            artifact: self.config.artifact_name(name),
            path: self.config.artifact_path(name),
        });

        tracing::debug!("{name}: {} needs, {} steps", needs.len(), steps.len());

        Ok(Job {
            name: name.to_string(),
            group: package.group.clone(),
            runs_on: self.config.runs_on(&package.group).to_string(),
            needs,
            steps,
        })
    }

    /// Build the jobs of every known package
    ///
    /// Aborts on the first error; there is no partial graph.
    pub fn build_all(&mut self) -> Result<JobGraph, GraphError> {
        let mut graph = JobGraph::new();
        for name in self.provider.list_names() {
            let job = self.build_job(&name)?;
            graph.insert(job);
        }
        tracing::info!("Built {} jobs", graph.len());
        Ok(graph)
    }
}
