use std::time::Duration;

use serde_json::Value;

use crate::{SyncError, Transport};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking transport over a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SyncError> {
        let mut response = self
            .agent
            .post(url)
            .send_json(body)
            .map_err(|err| match err {
                ureq::Error::StatusCode(status) => SyncError::Status {
                    url: url.to_string(),
                    status,
                },
                other => SyncError::Transport {
                    url: url.to_string(),
                    reason: other.to_string(),
                },
            })?;

        response
            .body_mut()
            .read_json::<Value>()
            .map_err(|err| SyncError::Decode(err.to_string()))
    }
}
