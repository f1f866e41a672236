//! Error types for poledet.

/// Result type alias for poledet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for poledet.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory of the running executable could not be determined.
    #[error("could not determine the directory of the running executable")]
    ConfigDirNotFound,

    /// Configuration file does not exist.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file.
        path: std::path::PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying YAML or TOML parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A key required by the orchestrator is absent from the configuration.
    #[error("missing required key '{key}' in config file '{path}'")]
    MissingConfigKey {
        /// Name of the missing key.
        key: String,
        /// Path to the config file.
        path: std::path::PathBuf,
    },

    /// Failed to list the inference source folder.
    #[error("failed to read source folder '{path}'")]
    SourceDirRead {
        /// Path to the folder.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source folder entry has a name that is not valid UTF-8.
    #[error("source folder entry '{path}' is not valid UTF-8")]
    NonUtf8SourceEntry {
        /// Entry path, joined onto the configured folder.
        path: std::path::PathBuf,
    },

    /// The detection library program could not be started.
    #[error("failed to launch detection library '{program}'")]
    LibraryLaunch {
        /// Program that was invoked.
        program: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The detection library reported a failure.
    #[error("detection library {action} failed ({status})")]
    LibraryFailed {
        /// Library action (train, val, predict).
        action: String,
        /// Exit status of the library process.
        status: std::process::ExitStatus,
    },

    /// Failed to write a dry-run invocation plan.
    #[error("failed to write invocation plan")]
    PlanWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Print an error and its source chain to stderr.
pub fn report(error: &Error) {
    eprintln!("error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
