//! Package records
//!
//! A package is one recipe directory (`<group>-<name>`) together with the
//! requirement lists declared in its `meta.yaml`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Jinja expression (`{{ ... }}`)
static JINJA_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").expect("valid jinja expression regex"));

/// Declared requirement specifiers of a package
///
/// Each specifier is free-form text whose first whitespace-delimited token
/// names the required package (`"android-base >=1.0"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    /// Build-time requirements (the recipe's `build` and `host` sections)
    #[serde(default)]
    pub build: Vec<String>,

    /// Run-time requirements
    #[serde(default)]
    pub run: Vec<String>,
}

impl Requirements {
    /// Create requirement lists from build and run specifiers
    pub fn new<B, R>(build: B, run: R) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            build: build.into_iter().map(Into::into).collect(),
            run: run.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if no requirements are declared
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.run.is_empty()
    }

    /// Extract the candidate package name of a requirement specifier
    pub fn candidate_name(spec: &str) -> Option<&str> {
        spec.split_whitespace().next()
    }
}

/// A buildable package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique package name (the recipe directory name)
    pub name: String,

    /// Group derived from the first segment of the name
    pub group: String,

    /// Declared requirements
    pub requirements: Requirements,
}

impl Package {
    /// Create a package, deriving its group from the name
    pub fn new(name: impl Into<String>, requirements: Requirements) -> Self {
        let name = name.into();
        let group = Self::group_of(&name).to_string();
        Self {
            name,
            group,
            requirements,
        }
    }

    /// Derive the group of a package name (`android-libffi` -> `android`)
    pub fn group_of(name: &str) -> &str {
        name.split_once('-').map_or(name, |(group, _)| group)
    }

    /// Build a package from the contents of its `meta.yaml`
    pub fn from_meta_yaml(name: impl Into<String>, content: &str) -> Result<Self, RecipeError> {
        let name = name.into();
        let requirements = parse_requirements(content).map_err(|e| RecipeError::Parse {
            package: name.clone(),
            error: e.to_string(),
        })?;
        Ok(Self::new(name, requirements))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RequirementsDocument {
    #[serde(default)]
    requirements: Option<RawRequirements>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRequirements {
    #[serde(default)]
    build: Option<Vec<serde_yaml::Value>>,
    #[serde(default)]
    host: Option<Vec<serde_yaml::Value>>,
    #[serde(default)]
    run: Option<Vec<serde_yaml::Value>>,
}

/// Parse the top-level `requirements:` block of a recipe
///
/// The rest of a `meta.yaml` is Jinja-templated and generally not valid
/// YAML, so only the requirements block is extracted and parsed.
fn parse_requirements(content: &str) -> Result<Requirements, serde_yaml::Error> {
    let Some(block) = requirements_block(content) else {
        return Ok(Requirements::default());
    };

    let document: RequirementsDocument = serde_yaml::from_str(&block)?;
    let Some(raw) = document.requirements else {
        return Ok(Requirements::default());
    };

    let mut build = specifiers(raw.build);
    build.extend(specifiers(raw.host));

    Ok(Requirements {
        build,
        run: specifiers(raw.run),
    })
}

/// Cut the `requirements:` block out of a recipe with Jinja removed
fn requirements_block(content: &str) -> Option<String> {
    let mut lines = content.lines().skip_while(|line| !is_requirements_key(line));
    let header = lines.next()?;

    let mut block = JINJA_EXPR.replace_all(header, "").into_owned();
    block.push('\n');

    for line in lines {
        if is_top_level_key(line) {
            break;
        }
        if line.trim_start().starts_with("{%") {
            continue;
        }
        block.push_str(&JINJA_EXPR.replace_all(line, ""));
        block.push('\n');
    }

    Some(block)
}

/// `requirements:` at column 0, followed by nothing, a comment or a flow value
fn is_requirements_key(line: &str) -> bool {
    line.strip_prefix("requirements:")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn is_top_level_key(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(char::is_whitespace)
        && !line.starts_with('#')
        && !line.starts_with('-')
        && !line.starts_with("{%")
}

fn specifiers(values: Option<Vec<serde_yaml::Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .filter_map(serde_yaml::Value::as_str)
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .map(String::from)
        .collect()
}
