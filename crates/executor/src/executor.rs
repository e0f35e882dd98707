// Elasticsearch Executor - version-gated launch + HTTP readiness

use std::sync::Arc;

use semver::Version;
use tracing::info;

use searchbed_core::domain::{build_command, ElasticsearchConfig, HttpAuth};
use searchbed_core::error::{FixtureError, Result};
use searchbed_core::port::{CommandRunner, SystemCommandRunner};
use searchbed_supervisor::{HttpSupervisor, StartupOptions};

use crate::node::ElasticsearchNode;
use crate::version::VersionDetector;

/// A running, supervised Elasticsearch process.
///
/// [`ElasticsearchExecutor::start`] is the whole startup sequence: derive
/// probe headers from the credentials, detect the binary version, build the
/// launch command, then spawn and wait for the server to answer HTTP. When
/// it returns `Ok` the server is ready; on any error no process is left
/// behind (version and command failures happen before the spawn, supervisor
/// failures kill the child before propagating).
#[derive(Debug)]
pub struct ElasticsearchExecutor {
    config: ElasticsearchConfig,
    version: Version,
    supervisor: HttpSupervisor,
}

impl ElasticsearchExecutor {
    /// Start a supervised server using the system command runner.
    pub async fn start(config: ElasticsearchConfig) -> Result<Self> {
        Self::start_with_runner(config, Arc::new(SystemCommandRunner)).await
    }

    /// Start with an injected [`CommandRunner`] (version-detection seam).
    pub async fn start_with_runner(
        config: ElasticsearchConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        let headers = match &config.http_auth {
            Some(auth) => vec![("Authorization".to_string(), auth.header_value())],
            None => Vec::new(),
        };

        let detector = VersionDetector::new(config.executable.clone(), runner);
        let version = detector.version()?.clone();

        let command = build_command(&config, &version)?;

        info!(
            executable = %config.executable.display(),
            version = %version,
            url = %config.http_url(),
            "starting Elasticsearch"
        );

        let opts = StartupOptions::new(
            command.program,
            command.args,
            config.http_url(),
            config.timeout,
        )
        .with_headers(headers);

        let supervisor = HttpSupervisor::start(opts)
            .await
            .map_err(|e| FixtureError::Startup(e.to_string()))?;

        Ok(Self {
            config,
            version,
            supervisor,
        })
    }

    /// Version reported by the binary, detected once at startup and never
    /// recomputed for this instance.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Process id of the supervised server.
    pub fn pid(&self) -> i32 {
        self.supervisor.pid()
    }

    /// Configuration this executor was started with.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }

    /// Stop the server: SIGTERM, bounded wait, then SIGKILL.
    ///
    /// Safe to call once; later calls are no-ops.
    pub async fn stop(&mut self) -> Result<()> {
        self.supervisor
            .stop()
            .await
            .map_err(|e| FixtureError::Shutdown(e.to_string()))
    }
}

impl ElasticsearchNode for ElasticsearchExecutor {
    fn host(&self) -> &str {
        &self.config.host
    }

    fn port(&self) -> u16 {
        self.config.port
    }

    fn http_auth(&self) -> Option<&HttpAuth> {
        self.config.http_auth.as_ref()
    }

    fn running(&self) -> bool {
        self.supervisor.running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchbed_core::port::command_runner::mocks::MockCommandRunner;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_config() -> ElasticsearchConfig {
        ElasticsearchConfig {
            executable: PathBuf::from("/nonexistent/elasticsearch"),
            host: "127.0.0.1".to_string(),
            port: 9201,
            tcp_port: 9301,
            pidfile: PathBuf::from("/tmp/searchbed/es.pid"),
            logs_path: PathBuf::from("/tmp/searchbed/logs"),
            works_path: PathBuf::from("/tmp/searchbed/data"),
            cluster_name: "searchbed_tests".to_string(),
            network_publish_host: "127.0.0.1".to_string(),
            index_store_type: "fs".to_string(),
            timeout: Duration::from_secs(5),
            http_auth: None,
        }
    }

    #[tokio::test]
    async fn test_unsupported_version_fails_before_spawn() {
        let runner = Arc::new(MockCommandRunner::with_stdout(
            "Version: 5.6.16, Build: 3a740d1/2019-03-13T15:33:36.565Z, JVM: 1.8.0_201",
        ));

        let result = ElasticsearchExecutor::start_with_runner(test_config(), runner).await;
        assert!(matches!(
            result,
            Err(FixtureError::UnsupportedVersion { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_executable_fails_detection() {
        let result = ElasticsearchExecutor::start(test_config()).await;

        let err = result.err().expect("start must fail");
        assert!(matches!(err, FixtureError::ExecutableNotFound { .. }));
        assert!(err.to_string().contains("/nonexistent/elasticsearch"));
    }
}
