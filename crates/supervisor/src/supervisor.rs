// HTTP-Readiness Supervisor
// Owns the child lifecycle: spawn -> poll until ready -> graceful stop

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::error::SupervisorError;
use crate::options::StartupOptions;
use crate::probe::probe_once;

/// Grace period between SIGTERM and SIGKILL on stop (5 seconds)
const GRACEFUL_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll interval for the exit check while waiting out the grace period
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A supervised OS process that answered an HTTP readiness probe.
///
/// [`HttpSupervisor::start`] does not return until the process is reachable
/// or the startup budget is spent; on any failure the child is killed before
/// the error surfaces, so a failed start never leaks a process.
#[derive(Debug)]
pub struct HttpSupervisor {
    child: Child,
    pid: i32,
    url: String,
    ready: bool,
    stopped: bool,
}

impl HttpSupervisor {
    /// Spawn the process described by `opts` and wait until it answers HTTP
    /// or the startup timeout elapses.
    ///
    /// # Errors
    /// - `SupervisorError::SpawnFailed` if the program cannot be started
    /// - `SupervisorError::ExitedEarly` if the child dies before answering
    /// - `SupervisorError::StartupTimeout` if the budget elapses; the child
    ///   is killed first
    pub async fn start(opts: StartupOptions) -> Result<Self, SupervisorError> {
        info!(
            program = %opts.program.display(),
            args = ?opts.args,
            url = %opts.url,
            timeout_ms = opts.timeout.as_millis() as u64,
            "starting supervised process"
        );

        let mut child = Command::new(&opts.program)
            .args(&opts.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SupervisorError::SpawnFailed {
                program: opts.program.display().to_string(),
                source,
            })?;

        let pid = child.id().map(|id| id as i32).unwrap_or(0);

        match timeout(opts.timeout, Self::wait_until_ready(&mut child, &opts)).await {
            Ok(Ok(())) => {
                info!(pid = %pid, url = %opts.url, "process is ready");
                Ok(Self {
                    child,
                    pid,
                    url: opts.url,
                    ready: true,
                    stopped: false,
                })
            }
            Ok(Err(e)) => {
                // child already exited and was reaped by try_wait
                warn!(pid = %pid, error = %e, "process failed before becoming ready");
                Err(e)
            }
            Err(_) => {
                warn!(pid = %pid, url = %opts.url, "startup timeout, killing process");
                child.kill().await.map_err(SupervisorError::Io)?;
                Err(SupervisorError::StartupTimeout {
                    url: opts.url,
                    timeout_ms: opts.timeout.as_millis() as u64,
                })
            }
        }
    }

    async fn wait_until_ready(
        child: &mut Child,
        opts: &StartupOptions,
    ) -> Result<(), SupervisorError> {
        let client = reqwest::Client::new();

        loop {
            if let Some(status) = child.try_wait()? {
                return Err(SupervisorError::ExitedEarly {
                    exit_code: status.code(),
                });
            }
            if probe_once(&client, &opts.url, &opts.headers).await {
                return Ok(());
            }
            sleep(opts.poll_interval).await;
        }
    }

    /// Process id of the supervised child.
    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// URL the readiness probe polled.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// True while the child is alive and readiness has been observed.
    pub fn running(&self) -> bool {
        !self.stopped && self.ready && is_alive(self.pid)
    }

    /// Terminate the child: SIGTERM, bounded wait, then SIGKILL.
    ///
    /// Idempotent; the second and later calls are no-ops. Worst case is
    /// bounded by [`GRACEFUL_STOP_TIMEOUT`] plus the kill itself.
    pub async fn stop(&mut self) -> Result<(), SupervisorError> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            info!(pid = %self.pid, "sending SIGTERM for graceful shutdown");
            if kill(Pid::from_raw(self.pid), Signal::SIGTERM).is_ok() {
                let deadline = Instant::now() + GRACEFUL_STOP_TIMEOUT;
                while Instant::now() < deadline {
                    if self.child.try_wait()?.is_some() {
                        debug!(pid = %self.pid, "process exited after SIGTERM");
                        return Ok(());
                    }
                    sleep(STOP_POLL_INTERVAL).await;
                }
                warn!(pid = %self.pid, "process did not exit after SIGTERM, sending SIGKILL");
            }
        }

        self.child.kill().await?;
        info!(pid = %self.pid, "process killed");
        Ok(())
    }
}

/// Signal-0 liveness check (no signal is actually delivered).
fn is_alive(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }

    #[cfg(unix)]
    {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        kill(Pid::from_raw(pid), None).is_ok()
    }

    #[cfg(windows)]
    {
        use std::process::Command as StdCommand;

        let output = StdCommand::new("tasklist")
            .args(["/FI", &format!("PID eq {}", pid), "/NH"])
            .output();

        match output {
            Ok(output) => String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()),
            Err(_) => false,
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal HTTP responder standing in for the supervised server's port.
    async fn spawn_http_stub() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            }
        });
        port
    }

    /// A free port with nothing listening on it.
    fn unbound_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    fn sleeper_opts(url: String, timeout: Duration) -> StartupOptions {
        StartupOptions::new("sleep", vec!["600".to_string()], url, timeout)
    }

    #[tokio::test]
    async fn test_start_waits_for_readiness() {
        let port = spawn_http_stub().await;
        let opts = sleeper_opts(
            format!("http://127.0.0.1:{}", port),
            Duration::from_secs(10),
        );

        let mut supervisor = HttpSupervisor::start(opts).await.unwrap();
        assert!(supervisor.running());
        assert!(supervisor.pid() > 0);

        supervisor.stop().await.unwrap();
        assert!(!supervisor.running());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let port = spawn_http_stub().await;
        let opts = sleeper_opts(
            format!("http://127.0.0.1:{}", port),
            Duration::from_secs(10),
        );

        let mut supervisor = HttpSupervisor::start(opts).await.unwrap();
        supervisor.stop().await.unwrap();
        supervisor.stop().await.unwrap();
        assert!(!supervisor.running());
    }

    #[tokio::test]
    async fn test_startup_timeout_kills_child() {
        let opts = sleeper_opts(
            format!("http://127.0.0.1:{}", unbound_port()),
            Duration::from_millis(300),
        );

        let result = HttpSupervisor::start(opts).await;
        assert!(matches!(
            result,
            Err(SupervisorError::StartupTimeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_early_exit_is_reported() {
        let opts = StartupOptions::new(
            "true",
            vec![],
            format!("http://127.0.0.1:{}", unbound_port()),
            Duration::from_secs(10),
        );

        let result = HttpSupervisor::start(opts).await;
        assert!(matches!(
            result,
            Err(SupervisorError::ExitedEarly { exit_code: Some(0) })
        ));
    }

    #[tokio::test]
    async fn test_spawn_failure_names_program() {
        let opts = StartupOptions::new(
            "/nonexistent/searchbed-server",
            vec![],
            "http://127.0.0.1:1".to_string(),
            Duration::from_secs(1),
        );

        let err = HttpSupervisor::start(opts).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/searchbed-server"));
    }
}
