// Searchbed Supervisor - generic HTTP-readiness process supervision
// Spawns a child process, polls an HTTP endpoint until it answers, and
// guarantees the child is gone after a failed start or a teardown.

pub mod error;
pub mod options;
pub mod probe;
pub mod supervisor;

// Re-exports
pub use error::SupervisorError;
pub use options::{StartupOptions, DEFAULT_POLL_INTERVAL};
pub use supervisor::HttpSupervisor;
