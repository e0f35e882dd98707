// Central Error Type for the Fixture

use std::path::PathBuf;

use thiserror::Error;

/// Fixture-level error type
///
/// Every variant is fatal at this layer; there is no retry and no degraded
/// mode. The no-op executor is a caller-selected alternative, not a fallback.
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("'{path}' does not point to an Elasticsearch executable: {source}")]
    ExecutableNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Elasticsearch version is not recognized. It is probably not supported. Output is:\n{output}")]
    UnsupportedVersionFormat { output: String },

    #[error("Elasticsearch {version} is not supported, 6.0.0 or newer is required")]
    UnsupportedVersion { version: semver::Version },

    #[error("Startup failed: {0}")]
    Startup(String),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

/// Result type alias using FixtureError
pub type Result<T> = std::result::Result<T, FixtureError>;

// Note: supervisor errors cross into this enum as strings at the executor
// boundary to keep core free of infrastructure dependencies.
