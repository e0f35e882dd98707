// Fixture Configuration Domain Model

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// HTTP Basic-auth credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAuth {
    pub login: String,
    pub password: String,
}

impl HttpAuth {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value: `Basic base64(login:password)`
    ///
    /// Used by the readiness probe and by any client traffic during startup.
    pub fn header_value(&self) -> String {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.login, self.password));
        format!("Basic {}", token)
    }
}

/// Fixture configuration, immutable after construction.
///
/// Field names are the contract with the surrounding option/config layer;
/// the serde derives exist for that layer, this crate never loads files.
///
/// Invariants the caller owns: `port` and `tcp_port` are distinct and
/// nonzero; `pidfile`, `logs_path` and `works_path` are pre-provisioned
/// locations the spawned process can write to. Neither is enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Path to the Elasticsearch executable.
    pub executable: PathBuf,
    /// Hostname the server binds and the probe connects to.
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Internal transport port.
    pub tcp_port: u16,
    /// Location the server writes its pid to.
    pub pidfile: PathBuf,
    /// Log directory.
    pub logs_path: PathBuf,
    /// Data directory.
    pub works_path: PathBuf,
    /// Cluster name.
    pub cluster_name: String,
    /// Host the server publishes for cluster connections.
    pub network_publish_host: String,
    /// Index store engine (opaque startup flag value).
    pub index_store_type: String,
    /// Wall-clock startup budget.
    pub timeout: Duration,
    /// Credentials for HTTP access, when the server is secured.
    pub http_auth: Option<HttpAuth>,
}

impl ElasticsearchConfig {
    /// Base URL the readiness probe polls.
    pub fn http_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
