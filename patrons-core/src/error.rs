//! Error types for patrons-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while assembling the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load. Carries the file path and serde_yaml line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("config file not found at {path}")]
    NotFound { path: PathBuf },

    /// `PATREON_ACCESS_TOKEN` is unset or empty.
    #[error("PATREON_ACCESS_TOKEN environment variable not set")]
    MissingToken,

    /// A field holds a value the run cannot work with.
    #[error("invalid config value for `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}
