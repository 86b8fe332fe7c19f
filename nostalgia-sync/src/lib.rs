//! Best-effort sync of quiz answers and password guesses to the collector API.
//!
//! Requests are plain JSON values so any host can send them: native hosts through a
//! [`Transport`] (the `ureq` one by default), the browser bridge through its own XHR
//! glue, feeding the response back into [`absorb_receipt`].

use log::{info, warn};
use nostalgia_core::{AbAnswers, KeyValueStore, SiteState};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "ureq")]
mod transport;

#[cfg(feature = "ureq")]
pub use transport::{UreqTransport, REQUEST_TIMEOUT};

/// The two collector endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    AbAnswers,
    PasswordGuesses,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::AbAnswers => "/api/ab-answers",
            Endpoint::PasswordGuesses => "/api/password-guesses",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Endpoint::AbAnswers => "A/B answers",
            Endpoint::PasswordGuesses => "password guesses",
        }
    }
}

#[derive(Serialize)]
struct AbAnswersBody<'a> {
    session_id: Option<&'a str>,
    answers: &'a AbAnswers,
}

#[derive(Serialize)]
struct PasswordGuessesBody<'a> {
    session_id: Option<&'a str>,
    guesses: &'a [String],
}

/// A ready-to-send POST: endpoint plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRequest {
    pub endpoint: Endpoint,
    pub body: Value,
}

impl SyncRequest {
    pub fn ab_answers(session_id: Option<&str>, answers: &AbAnswers) -> Result<Self, SyncError> {
        let body = serde_json::to_value(AbAnswersBody {
            session_id,
            answers,
        })
        .map_err(|err| SyncError::Encode(err.to_string()))?;
        Ok(Self {
            endpoint: Endpoint::AbAnswers,
            body,
        })
    }

    pub fn password_guesses(session_id: Option<&str>, guesses: &[String]) -> Result<Self, SyncError> {
        let body = serde_json::to_value(PasswordGuessesBody {
            session_id,
            guesses,
        })
        .map_err(|err| SyncError::Encode(err.to_string()))?;
        Ok(Self {
            endpoint: Endpoint::PasswordGuesses,
            body,
        })
    }

    /// Full URL under `base`; a trailing slash on the base is ignored.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.endpoint.path())
    }
}

/// Decoded response of either endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncReceipt {
    pub session_id: Option<String>,
    /// Whatever else the server sent back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SyncReceipt {
    pub fn from_value(value: Value) -> Result<Self, SyncError> {
        if !value.is_object() {
            return Err(SyncError::Decode(format!("expected a JSON object, received {value}")));
        }
        serde_json::from_value(value).map_err(|err| SyncError::Decode(err.to_string()))
    }
}

/// Sends one JSON POST and returns the decoded JSON response.
pub trait Transport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SyncError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SyncError> {
        (**self).post_json(url, body)
    }
}

/// Decodes a raw response and adopts the session id it carries.
///
/// Failures are logged and reported as `None`; local state is left as it was.
pub fn absorb_receipt<S: KeyValueStore>(
    state: &mut SiteState<S>,
    endpoint: Endpoint,
    response: Value,
) -> Option<SyncReceipt> {
    match SyncReceipt::from_value(response) {
        Ok(receipt) => {
            if let Some(id) = receipt.session_id.as_deref() {
                if state.adopt_session(id) {
                    info!("session id {id} adopted");
                }
            }
            info!("{} saved", endpoint.label());
            Some(receipt)
        }
        Err(err) => {
            warn!("failed to save {}: {err}", endpoint.label());
            None
        }
    }
}

/// Fire-and-forget client for the collector API.
#[derive(Debug, Clone)]
pub struct SyncClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> SyncClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn send(&self, request: &SyncRequest) -> Result<Value, SyncError> {
        let url = request.url(&self.base_url);
        self.transport.post_json(&url, &request.body)
    }

    /// Posts the full answer set; `None` when anything along the way failed.
    pub fn save_ab_answers<S: KeyValueStore>(&self, state: &mut SiteState<S>) -> Option<SyncReceipt> {
        let request = SyncRequest::ab_answers(state.session_id(), state.quiz().answers());
        self.deliver(state, request)
    }

    /// Posts the guesses collected by the last submit.
    pub fn save_password_guesses<S: KeyValueStore>(
        &self,
        state: &mut SiteState<S>,
    ) -> Option<SyncReceipt> {
        let request = SyncRequest::password_guesses(state.session_id(), state.guesses().guesses());
        self.deliver(state, request)
    }

    fn deliver<S: KeyValueStore>(
        &self,
        state: &mut SiteState<S>,
        request: Result<SyncRequest, SyncError>,
    ) -> Option<SyncReceipt> {
        let response = request.and_then(|request| {
            let response = self.send(&request)?;
            Ok((request.endpoint, response))
        });
        match response {
            Ok((endpoint, response)) => absorb_receipt(state, endpoint, response),
            Err(err) => {
                warn!("sync to {} failed: {err}", self.base_url);
                None
            }
        }
    }
}

/// Errors raised while talking to the collector API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("Could not encode request body: {0}")]
    Encode(String),
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("Could not decode response: {0}")]
    Decode(String),
}
