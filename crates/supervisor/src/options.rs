// Startup Options for a Supervised Process

use std::path::PathBuf;
use std::time::Duration;

/// Delay between readiness probes (100ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything needed to start one supervised process.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// Program to execute.
    pub program: PathBuf,
    /// Structured argument list (no shell involved).
    pub args: Vec<String>,
    /// URL polled for readiness.
    pub url: String,
    /// Wall-clock startup budget.
    pub timeout: Duration,
    /// Delay between readiness probes.
    pub poll_interval: Duration,
    /// Headers sent with every probe (e.g. Authorization).
    pub headers: Vec<(String, String)>,
}

impl StartupOptions {
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<String>,
        url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            url: url.into(),
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
            headers: Vec::new(),
        }
    }

    /// Attach probe headers.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }
}
