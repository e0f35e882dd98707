// Version Detection with Per-Instance Memoization

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use semver::Version;
use tracing::debug;

use searchbed_core::domain::parse_version_output;
use searchbed_core::error::{FixtureError, Result};
use searchbed_core::port::CommandRunner;

/// Flag that makes Elasticsearch print its version and exit.
const VERSION_FLAG: &str = "-Vv";

/// Detects the version of an Elasticsearch binary.
///
/// The first successful detection is cached for the lifetime of the
/// detector; the binary is never invoked again afterwards, even if it
/// changes on disk. Failures are not cached, a later call retries.
pub struct VersionDetector {
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
    cached: OnceLock<Version>,
}

impl VersionDetector {
    pub fn new(executable: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            executable,
            runner,
            cached: OnceLock::new(),
        }
    }

    /// Detected version, invoking the binary on the first call only.
    ///
    /// # Errors
    /// - `FixtureError::ExecutableNotFound` if the binary cannot be spawned
    /// - `FixtureError::UnsupportedVersionFormat` if its output carries no
    ///   recognizable `Version: x.y.z` line
    pub fn version(&self) -> Result<&Version> {
        if let Some(version) = self.cached.get() {
            return Ok(version);
        }

        let version = self.detect()?;
        Ok(self.cached.get_or_init(|| version))
    }

    fn detect(&self) -> Result<Version> {
        let stdout = self
            .runner
            .run(&self.executable, &[VERSION_FLAG])
            .map_err(|source| FixtureError::ExecutableNotFound {
                path: self.executable.clone(),
                source,
            })?;

        let output = String::from_utf8_lossy(&stdout).to_string();
        let version = parse_version_output(&output)
            .ok_or_else(|| FixtureError::UnsupportedVersionFormat { output })?;

        debug!(
            executable = %self.executable.display(),
            version = %version,
            "detected Elasticsearch version"
        );
        Ok(version)
    }
}
