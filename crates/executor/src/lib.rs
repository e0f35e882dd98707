// Searchbed Executor - Elasticsearch fixture surface
// Composes version detection, command building and process supervision

pub mod executor;
pub mod node;
pub mod noop;
pub mod version;

// Re-exports
pub use executor::ElasticsearchExecutor;
pub use node::ElasticsearchNode;
pub use noop::NoopElasticsearch;
pub use version::VersionDetector;
