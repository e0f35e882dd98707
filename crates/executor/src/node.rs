// Fixture Node Contract

use searchbed_core::domain::HttpAuth;

/// Minimal contract test code depends on, regardless of who manages the
/// server process.
///
/// Implemented by [`crate::ElasticsearchExecutor`] (real supervised process)
/// and [`crate::NoopElasticsearch`] (externally supplied server).
pub trait ElasticsearchNode {
    /// Hostname the server is reachable under.
    fn host(&self) -> &str;

    /// HTTP port the server listens on.
    fn port(&self) -> u16;

    /// Credentials used for HTTP access, when configured.
    fn http_auth(&self) -> Option<&HttpAuth>;

    /// Whether the server is up and answering.
    fn running(&self) -> bool;
}
