//! GitHub Actions workflow rendering
//!
//! Turns the abstract job graph into a `ci.yml` workflow. Every piece of
//! shell script and action syntax lives here.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::Value;

use crate::config::urls::{
    ANDROID_CMDLINE_TOOLS, CACHE_ACTION, CHECKOUT_ACTION, DOWNLOAD_ARTIFACT_ACTION,
    SETUP_JAVA_ACTION, SETUP_MINICONDA_ACTION, UPLOAD_ARTIFACT_ACTION,
};
use crate::core::config::GeneratorConfig;
use crate::core::jobs::{Job, JobGraph};
use crate::core::step::Step;
use crate::error::RenderError;

/// conda-build install that also patches its pyc cleanup, which fails on
/// optimized files that were already removed
const CONDA_BUILD_SCRIPT: &str = "conda install conda-build
sed -i 's/.match(fn):/.match(fn) and exists(join(prefix, fn)):/g' /usr/share/miniconda/lib/python3.9/site-packages/conda_build/post.py
";

/// Step id of the Android SDK cache, referenced by the install condition
const ANDROID_CACHE_ID: &str = "android-cache";

#[derive(Debug, Serialize)]
struct Workflow<'a> {
    name: &'a str,
    on: &'static str,
    jobs: BTreeMap<&'a str, WorkflowJob>,
}

#[derive(Debug, Serialize)]
struct WorkflowJob {
    #[serde(rename = "runs-on")]
    runs_on: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    needs: Vec<String>,
    steps: Vec<WorkflowStep>,
}

#[derive(Debug, Default, Serialize)]
struct WorkflowStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'static str>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uses: Option<&'static str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    with: BTreeMap<&'static str, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<String>,
}

impl WorkflowStep {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn uses(mut self, action: &'static str) -> Self {
        self.uses = Some(action);
        self
    }

    fn with(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.with.insert(key, value.into());
        self
    }

    fn run(mut self, script: impl Into<String>) -> Self {
        self.run = Some(script.into());
        self
    }
}

/// Render the job graph as a GitHub Actions workflow
pub fn render_workflow(graph: &JobGraph, config: &GeneratorConfig) -> Result<String, RenderError> {
    let jobs = graph
        .iter()
        .map(|job| (job.name.as_str(), render_job(job, config)))
        .collect();

    let workflow = Workflow {
        name: &config.workflow_name,
        on: "push",
        jobs,
    };

    Ok(serde_yaml::to_string(&workflow)?)
}

fn render_job(job: &Job, config: &GeneratorConfig) -> WorkflowJob {
    WorkflowJob {
        runs_on: job.runs_on.clone(),
        needs: job.needs.clone(),
        steps: job
            .steps
            .iter()
            .flat_map(|step| render_step(step, config))
            .collect(),
    }
}

fn render_step(step: &Step, config: &GeneratorConfig) -> Vec<WorkflowStep> {
    let step = match step {
        Step::Checkout => WorkflowStep::default().uses(CHECKOUT_ACTION),
        Step::SetupConda { python_version } => WorkflowStep::named("Setup conda")
            .uses(SETUP_MINICONDA_ACTION)
            .with("auto-update-conda", true)
            .with("python-version", python_version.as_str()),
        Step::InstallCondaBuild => WorkflowStep::named("Install conda build").run(CONDA_BUILD_SCRIPT),
        Step::InstallSystemPackages { packages } => WorkflowStep::named("Install system deps")
            .run(format!("sudo apt-get install -y {}", packages.join(" "))),
        Step::SetupJdk { java_version } => WorkflowStep::named("Setup JDK")
            .uses(SETUP_JAVA_ACTION)
            .with("java-version", *java_version),
        Step::AndroidNdk { version } => return android_ndk_steps(version),
        Step::FetchArtifact { artifact, .. } => WorkflowStep::named("Download requirements")
            .uses(DOWNLOAD_ARTIFACT_ACTION)
            .with("name", artifact.as_str())
            .with("path", format!("{}/", config.artifact_root)),
        Step::ReindexArtifacts { path } => {
            WorkflowStep::named("Run conda index").run(format!("conda index {path}"))
        }
        Step::BuildRecipe {
            package,
            python_version,
        } => WorkflowStep::named("Build recipe")
            .run(format!("conda build --py={python_version} {package}")),
        Step::PublishArtifact { artifact, path, .. } => WorkflowStep::named("Upload package")
            .uses(UPLOAD_ARTIFACT_ACTION)
            .with("name", artifact.as_str())
            .with("path", path.as_str()),
    };
    vec![step]
}

/// Cache the SDK directory and install the SDK and NDK on a cache miss
fn android_ndk_steps(version: &str) -> Vec<WorkflowStep> {
    let cache = WorkflowStep {
        id: Some(ANDROID_CACHE_ID),
        ..WorkflowStep::named("Cache Android NDK")
            .uses(CACHE_ACTION)
            .with("path", "~/Android")
            .with("key", format!("linux-android-ndk-{version}"))
    };

    let install = WorkflowStep {
        condition: Some(format!(
            "steps.{ANDROID_CACHE_ID}.outputs.cache-hit != 'true'"
        )),
        ..WorkflowStep::named("Setup android NDK").run(android_ndk_script(version))
    };

    vec![cache, install]
}

fn android_ndk_script(version: &str) -> String {
    format!(
        r#"export ANDROID_HOME="$HOME/Android/Sdk"
export ANDROID_SDK_ROOT="$HOME/Android/Sdk"
export PATH="$PATH:$ANDROID_HOME/cmdline-tools/latest/bin"
mkdir -p $ANDROID_HOME
wget -q {ANDROID_CMDLINE_TOOLS}
unzip -e commandlinetools-linux-8092744_latest.zip -d $ANDROID_HOME/cmdline-tools
mv $ANDROID_HOME/cmdline-tools/cmdline-tools $ANDROID_HOME/cmdline-tools/latest
yes | sdkmanager --licenses > /dev/null
sdkmanager --install tools
sdkmanager --install platform-tools
sdkmanager --install "ndk;{version}"
"#
    )
}
