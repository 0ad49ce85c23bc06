//! Default configuration values

/// Generator config file name, looked up in the recipe root
pub const CONFIG_FILE_NAME: &str = "recipe-ci.toml";

/// Recipe metadata file inside each package directory
pub const META_FILE_NAME: &str = "meta.yaml";

/// Recipe build script inside each package directory
pub const BUILD_SCRIPT_NAME: &str = "build.sh";

/// Workflow output path relative to the recipe root
pub const WORKFLOW_PATH: &str = ".github/workflows/ci.yml";

/// Default workflow name
pub const DEFAULT_WORKFLOW_NAME: &str = "CI";

/// Python version packages are built for
pub const DEFAULT_PYTHON_VERSION: &str = "3.10";

/// Android NDK version installed for the android group
pub const DEFAULT_NDK_VERSION: &str = "23.1.7779620";

/// JDK version installed for the android group
pub const DEFAULT_JAVA_VERSION: u32 = 11;

/// conda-build output directory on the runner
pub const DEFAULT_ARTIFACT_ROOT: &str = "/usr/share/miniconda/conda-bld";

/// Runner used when a group does not name one
pub const DEFAULT_RUNS_ON: &str = "ubuntu-latest";

/// Runner for Apple targets
pub const MACOS_RUNS_ON: &str = "macos-latest";

/// OS packages the android recipes build with
pub const ANDROID_SYSTEM_PACKAGES: &[&str] = &["autopoint", "texinfo", "rename"];
