//! Email-code authentication flow.
//!
//! Two steps: request a verification code (sent to the account email), then
//! verify the code to obtain an access token and user id. The request token
//! bridging the two steps lives in a caller-owned [`PendingAuthStore`]
//! rather than process-global state, so the owner decides its scope and
//! lifetime.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::{normalize_base_url, Credentials, DEFAULT_GATEWAY_URL};
use crate::{Error, Result};

const REQUEST_CODE_PATH: &str = "/api/v2/auth/request-code";
const VERIFY_CODE_PATH: &str = "/api/v2/auth/verify-code";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle returned by the request step; its token must be presented when
/// verifying the emailed code.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingAuth {
    pub request_token: String,
}

/// Client for the gateway's credential endpoints. Independent of
/// [`crate::GatewayClient`]: it runs before any credentials exist.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Client against the public gateway.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_GATEWAY_URL)
    }

    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.as_ref())?,
        })
    }

    /// Request a verification code for `email`. A 4xx response usually
    /// means the email is not registered; the raw gateway message is
    /// preserved for the caller.
    pub async fn request_code(&self, email: &str) -> Result<PendingAuth> {
        let body = self
            .post(REQUEST_CODE_PATH, &json!({ "email": email }))
            .await?;
        let pending: PendingAuth = serde_json::from_str(&body)?;
        info!(email, "verification code requested");
        Ok(pending)
    }

    /// Verify the emailed code. Returns the credentials to store in the
    /// host configuration. An "expired" failure means the request token is
    /// stale and the flow must restart from [`AuthClient::request_code`].
    pub async fn verify_code(
        &self,
        email: &str,
        request_token: &str,
        code: &str,
    ) -> Result<Credentials> {
        let body = self
            .post(
                VERIFY_CODE_PATH,
                &json!({
                    "email": email,
                    "request_token": request_token,
                    "code": code,
                }),
            )
            .await?;
        let credentials: Credentials = serde_json::from_str(&body)?;
        info!(email, user_id = %credentials.user_id, "authentication verified");
        Ok(credentials)
    }

    async fn post(&self, path: &str, payload: &serde_json::Value) -> Result<String> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::transport(status.as_u16(), body));
        }
        Ok(body)
    }
}

/// Caller-owned store bridging the two auth steps, keyed by email.
///
/// Replaces ambient process-wide state: whoever drives the flow owns the
/// store and passes it where it is needed.
#[derive(Debug, Default)]
pub struct PendingAuthStore {
    entries: HashMap<String, String>,
}

impl PendingAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, email: impl Into<String>, request_token: impl Into<String>) {
        self.entries.insert(email.into(), request_token.into());
    }

    /// Resolve the token for a verify step. An explicitly supplied token
    /// wins over the stored one.
    pub fn resolve(&self, email: &str, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.entries.get(email).cloned())
    }

    /// Remove and return the stored token once the flow completes.
    pub fn take(&mut self, email: &str) -> Option<String> {
        self.entries.remove(email)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
