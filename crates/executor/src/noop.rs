// No-op Executor for Externally Managed Servers

use searchbed_core::domain::HttpAuth;

use crate::node::ElasticsearchNode;

/// Stand-in executor used when the Elasticsearch server is supplied
/// externally and the fixture must not manage a process.
///
/// Stores connection details for inspection only; never spawns, never
/// probes, never fails.
#[derive(Debug, Clone)]
pub struct NoopElasticsearch {
    host: String,
    port: u16,
    http_auth: Option<HttpAuth>,
}

impl NoopElasticsearch {
    pub fn new(host: impl Into<String>, port: u16, http_auth: Option<HttpAuth>) -> Self {
        Self {
            host: host.into(),
            port,
            http_auth,
        }
    }
}

impl ElasticsearchNode for NoopElasticsearch {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn http_auth(&self) -> Option<&HttpAuth> {
        self.http_auth.as_ref()
    }

    /// The external server is somebody else's job; report running always.
    fn running(&self) -> bool {
        true
    }
}
