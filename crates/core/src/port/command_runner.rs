// Command Runner Port (version detection, for testability)

use std::io;
use std::path::Path;

/// Synchronous process invocation port (allows mocking in tests)
///
/// Captures stdout only; the exit status is not part of the contract.
/// Unrecognized output is diagnosed downstream by the version parser.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, wait for it to exit and return its stdout.
    ///
    /// # Errors
    /// An `io::Error` when the program cannot be found or started.
    fn run(&self, program: &Path, args: &[&str]) -> io::Result<Vec<u8>>;
}

/// System command runner (production)
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &Path, args: &[&str]) -> io::Result<Vec<u8>> {
        tracing::debug!(program = %program.display(), args = ?args, "running command");
        let output = std::process::Command::new(program).args(args).output()?;
        Ok(output.stdout)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Return canned stdout
        Stdout(String),
        /// Fail as if the program did not resolve
        NotFound,
    }

    /// Mock CommandRunner with call-count instrumentation
    pub struct MockCommandRunner {
        behavior: MockBehavior,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockCommandRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        pub fn with_stdout(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Stdout(stdout.into()))
        }

        pub fn not_found() -> Self {
            Self::new(MockBehavior::NotFound)
        }

        /// How many times `run` was invoked.
        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    impl CommandRunner for MockCommandRunner {
        fn run(&self, _program: &Path, _args: &[&str]) -> io::Result<Vec<u8>> {
            *self.call_count.lock().unwrap() += 1;

            match &self.behavior {
                MockBehavior::Stdout(stdout) => Ok(stdout.clone().into_bytes()),
                MockBehavior::NotFound => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "No such file or directory",
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockCommandRunner;
    use super::*;

    #[test]
    fn test_system_runner_captures_stdout() {
        let stdout = SystemCommandRunner
            .run(Path::new("echo"), &["hello"])
            .unwrap();
        assert!(String::from_utf8_lossy(&stdout).contains("hello"));
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let err = SystemCommandRunner
            .run(Path::new("/nonexistent/searchbed-binary"), &["-Vv"])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_counts_calls() {
        let runner = MockCommandRunner::with_stdout("Version: 7.10.2");
        assert_eq!(runner.call_count(), 0);
        runner.run(Path::new("elasticsearch"), &["-Vv"]).unwrap();
        runner.run(Path::new("elasticsearch"), &["-Vv"]).unwrap();
        assert_eq!(runner.call_count(), 2);
    }
}
