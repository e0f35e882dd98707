// Launch Command Construction (version-gated)

use std::path::PathBuf;

use semver::Version;

use crate::domain::config::ElasticsearchConfig;
use crate::error::{FixtureError, Result};

/// Oldest version whose CLI flag surface matches the one emitted here.
/// Older binaries use an incompatible flag scheme and are rejected before
/// any process is spawned.
pub const MIN_SUPPORTED_VERSION: Version = Version::new(6, 0, 0);

/// A launch command as a structured argument list (no shell involved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Build the launch command for `config`, refusing versions below
/// [`MIN_SUPPORTED_VERSION`].
///
/// Values are substituted literally. The network publish host is wrapped in
/// single quotes so values carrying special characters survive a later shell
/// boundary; nothing else is escaped or validated - callers own their
/// quoting.
pub fn build_command(config: &ElasticsearchConfig, version: &Version) -> Result<LaunchCommand> {
    if *version < MIN_SUPPORTED_VERSION {
        return Err(FixtureError::UnsupportedVersion {
            version: version.clone(),
        });
    }

    let mut args = vec!["-p".to_string(), config.pidfile.display().to_string()];

    let settings = [
        ("http.port", config.port.to_string()),
        ("transport.tcp.port", config.tcp_port.to_string()),
        ("path.logs", config.logs_path.display().to_string()),
        ("path.data", config.works_path.display().to_string()),
        ("cluster.name", config.cluster_name.clone()),
        ("network.host", format!("'{}'", config.network_publish_host)),
        ("index.store.type", config.index_store_type.clone()),
    ];
    for (key, value) in settings {
        args.push("-E".to_string());
        args.push(format!("{}={}", key, value));
    }

    Ok(LaunchCommand {
        program: config.executable.clone(),
        args,
    })
}
