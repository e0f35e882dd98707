// Shared Helpers for Searchbed Integration Tests

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use searchbed_core::domain::{ElasticsearchConfig, HttpAuth};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Install a fmt subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Write a stub `elasticsearch` script into `dir`.
///
/// The stub answers `-Vv` with `version_line`, otherwise writes its pid to
/// the file following `-p` and sleeps, standing in for a server that is
/// still busy booting. The test itself runs the HTTP listener the readiness
/// probe talks to.
#[cfg(unix)]
pub fn write_stub_binary(dir: &Path, version_line: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"-Vv\" ]; then\n\
         \techo \"{}\"\n\
         \texit 0\n\
         fi\n\
         if [ \"$1\" = \"-p\" ]; then\n\
         \techo $$ > \"$2\"\n\
         fi\n\
         exec sleep 600\n",
        version_line
    );

    let path = dir.join("elasticsearch");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Request heads captured by [`spawn_http_stub`].
pub type CapturedRequests = Arc<Mutex<Vec<String>>>;

/// Minimal HTTP responder standing in for the server's HTTP port; records
/// every request head it receives and answers 200.
pub async fn spawn_http_stub() -> (u16, CapturedRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let requests: CapturedRequests = Arc::new(Mutex::new(Vec::new()));

    let captured = requests.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = [0u8; 2048];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            captured
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&buf[..n]).to_string());
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await;
        }
    });

    (port, requests)
}

/// A free port with nothing listening on it.
pub fn unbound_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Config pointing at `executable`, with pre-provisioned scratch
/// directories under `dir` (the fixture layer's job, done here by the
/// test).
pub fn config_for(
    executable: PathBuf,
    dir: &Path,
    port: u16,
    http_auth: Option<HttpAuth>,
) -> ElasticsearchConfig {
    let logs_path = dir.join("logs");
    let works_path = dir.join("data");
    std::fs::create_dir_all(&logs_path).unwrap();
    std::fs::create_dir_all(&works_path).unwrap();

    ElasticsearchConfig {
        executable,
        host: "127.0.0.1".to_string(),
        port,
        tcp_port: port + 1,
        pidfile: dir.join("elasticsearch.pid"),
        logs_path,
        works_path,
        cluster_name: "searchbed_integration".to_string(),
        network_publish_host: "127.0.0.1".to_string(),
        index_store_type: "fs".to_string(),
        timeout: Duration::from_secs(15),
        http_auth,
    }
}
