//! Action references and download URLs used by rendered workflows

/// Repository checkout action
pub const CHECKOUT_ACTION: &str = "actions/checkout@v2";

/// Miniconda setup action
pub const SETUP_MINICONDA_ACTION: &str = "conda-incubator/setup-miniconda@v2";

/// JDK setup action
pub const SETUP_JAVA_ACTION: &str = "actions/setup-java@v1";

/// Cache action
pub const CACHE_ACTION: &str = "actions/cache@v2";

/// Artifact upload action
pub const UPLOAD_ARTIFACT_ACTION: &str = "actions/upload-artifact@v2";

/// Artifact download action
pub const DOWNLOAD_ARTIFACT_ACTION: &str = "actions/download-artifact@v2";

/// Android command line tools archive
pub const ANDROID_CMDLINE_TOOLS: &str =
    "https://dl.google.com/android/repository/commandlinetools-linux-8092744_latest.zip";
