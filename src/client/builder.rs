use std::time::Duration;

use crate::config::{normalize_base_url, DEFAULT_GATEWAY_URL};
use crate::transport::HttpTransport;
use crate::{Error, Result};

use super::GatewayClient;

/// Fluent construction for [`GatewayClient`].
pub struct GatewayClientBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
    user_id: Option<String>,
    timeout: Duration,
}

impl GatewayClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            access_token: None,
            user_id: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Per-request HTTP timeout (default 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client. Credential absence is reported here, before any
    /// network call can happen.
    pub fn build(self) -> Result<GatewayClient> {
        let mut missing = Vec::new();
        if self.access_token.as_deref().map_or(true, str::is_empty) {
            missing.push("access_token");
        }
        if self.user_id.as_deref().map_or(true, str::is_empty) {
            missing.push("user_id");
        }
        if !missing.is_empty() {
            return Err(Error::CredentialsMissing {
                detail: missing.join(", "),
            });
        }

        let base_url =
            normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_GATEWAY_URL))?;
        let transport = HttpTransport::with_timeout(
            &base_url,
            self.access_token.as_deref().unwrap_or_default(),
            self.user_id.as_deref().unwrap_or_default(),
            self.timeout,
        )?;
        Ok(GatewayClient::from_transport(transport))
    }
}

impl Default for GatewayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
