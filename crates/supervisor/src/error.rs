// Supervisor Error Types

use thiserror::Error;

/// Supervision errors
#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Spawn failed for '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process exited before becoming ready (exit code {exit_code:?})")]
    ExitedEarly { exit_code: Option<i32> },

    #[error("No response from {url} within {timeout_ms}ms")]
    StartupTimeout { url: String, timeout_ms: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
