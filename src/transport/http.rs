use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::protocol::{RequestEnvelope, ResponseEnvelope};
use crate::{Error, Result};

/// Response header carrying the session token. Echoed back as a request
/// header on every subsequent call until the session is cleared.
pub const SESSION_HEADER: &str = "Voicegate-Session-Id";

/// Caller identity header.
pub const USER_HEADER: &str = "X-Voicegate-User-Id";

/// RPC endpoint path under the gateway base URL.
const RPC_PATH: &str = "/rpc";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side session state: the opaque token plus the request-id
/// sequence.
///
/// Token updates are last-write-wins; the gateway treats the token as
/// advisory, so concurrent writers need no finer coordination. Ids start
/// at 1 and are never reused within the session's lifetime, even across
/// failed calls.
#[derive(Debug)]
pub struct Session {
    token: RwLock<Option<String>>,
    next_id: AtomicU64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    /// Drop the token; the next call re-establishes the session.
    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends request envelopes to the gateway's RPC endpoint.
///
/// Every outgoing call attaches the JSON content markers, the bearer
/// credential, the caller identity header, and, once established, the
/// session token.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    access_token: RwLock<String>,
    user_id: String,
    session: Session,
}

impl HttpTransport {
    pub fn new(base_url: &str, access_token: &str, user_id: &str) -> Result<Self> {
        Self::with_timeout(base_url, access_token, user_id, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        access_token: &str,
        user_id: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), RPC_PATH),
            access_token: RwLock::new(access_token.to_string()),
            user_id: user_id.to_string(),
            session: Session::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the bearer credential and clear the session token. Server
    /// session state is keyed to the credential that created it, so the
    /// next call re-establishes a session.
    pub fn set_access_token(&self, token: impl Into<String>) {
        *self.access_token.write().unwrap() = token.into();
        self.session.clear_token();
    }

    /// Send one request envelope and return the parsed response envelope.
    ///
    /// A fresh session token in the response is stored before any status
    /// handling, so even an error response can rotate the session and the
    /// caller's next request presents the new token automatically.
    pub async fn send(&self, method: &str, params: Option<Value>) -> Result<ResponseEnvelope> {
        let id = self.session.next_request_id();
        let envelope = RequestEnvelope::call(id, method, params);
        let response = self.post(&envelope).await?;

        if let Some(token) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
        {
            self.session.set_token(token);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(status.as_u16(), body));
        }

        Ok(response.json::<ResponseEnvelope>().await?)
    }

    /// Post a one-way notification. No response is awaited and no id is
    /// consumed; delivery failure is logged and swallowed, since the
    /// gateway never acknowledges notifications and they are not retried.
    pub async fn notify(&self, method: &str) {
        let envelope = RequestEnvelope::notification(method);
        if let Err(err) = self.post(&envelope).await {
            debug!(method, error = %err, "notification delivery failed");
        }
    }

    async fn post(&self, envelope: &RequestEnvelope) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header(USER_HEADER, &self.user_id)
            .bearer_auth(self.access_token.read().unwrap().clone())
            .json(envelope);

        if let Some(token) = self.session.token() {
            request = request.header(SESSION_HEADER, token);
        }

        Ok(request.send().await?)
    }
}
