// Readiness Probing

use tracing::debug;

/// One readiness probe: any HTTP response counts, connection-level failure
/// does not.
///
/// A booting server may answer 401 or 503 before auth or cluster state
/// settles; reachability is the readiness contract here, not the status
/// code.
pub async fn probe_once(
    client: &reqwest::Client,
    url: &str,
    headers: &[(String, String)],
) -> bool {
    let mut request = client.get(url);
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }

    match request.send().await {
        Ok(response) => {
            debug!(%url, status = %response.status(), "readiness probe answered");
            true
        }
        Err(e) => {
            debug!(%url, error = %e, "readiness probe got no response");
            false
        }
    }
}
