use std::time::Duration;

use url::Url;

use crate::ClientError;

/// Fixed delay between a "processing" answer and the next poll.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin the endpoints are resolved against (path is always `/`).
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    /// Forward a `task_id` from the submit response as a poll query parameter.
    pub thread_task_id: bool,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
            thread_task_id: false,
        }
    }

    pub fn for_origin(origin: &str) -> Result<Self, ClientError> {
        Ok(Self::new(base_url_from_origin(origin)?))
    }
}

/// Reduces an origin or page URL to protocol, host and port.
pub fn base_url_from_origin(origin: &str) -> Result<Url, ClientError> {
    let mut url =
        Url::parse(origin.trim()).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "unsupported scheme {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ClientError::InvalidUrl(format!("{origin} has no host")));
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    // Only fails for cannot-be-a-base URLs, which http(s) with a host never is.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    Ok(url)
}
