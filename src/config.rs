//! Gateway configuration, validated at the boundary.
//!
//! Hosts hand over loosely-populated config; [`GatewayConfig::validate`]
//! turns it into a [`ValidatedConfig`] or reports exactly what is missing.
//! Credential absence is surfaced here, before any network call.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Public gateway endpoint used when the host supplies none.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.voicegate.ai";

/// Raw plugin configuration as handed over by the host. All fields are
/// optional at this stage; validation decides what is actually required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub gateway_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Credentials produced by the auth flow and consumed by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: String,
}

/// Configuration that passed boundary validation.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Normalized base URL, no trailing slash.
    pub base_url: String,
    pub credentials: Credentials,
}

impl GatewayConfig {
    /// Validate the raw config. Missing credential fields are reported by
    /// name via [`Error::CredentialsMissing`]; a malformed or non-HTTP
    /// gateway URL is a configuration error.
    pub fn validate(&self) -> Result<ValidatedConfig> {
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

        let raw = self
            .gateway_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_GATEWAY_URL);
        let base_url = normalize_base_url(raw)?;

        Ok(ValidatedConfig {
            base_url,
            credentials: Credentials {
                access_token: self.access_token.clone().unwrap_or_default(),
                user_id: self.user_id.clone().unwrap_or_default(),
            },
        })
    }
}

/// Parse and normalize a gateway base URL (scheme check, trailing slash).
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| Error::configuration(format!("invalid gateway URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration(format!(
            "gateway URL must be http(s), got '{}'",
            url.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_named() {
        let err = GatewayConfig::default().validate().unwrap_err();
        match err {
            Error::CredentialsMissing { detail } => {
                assert!(detail.contains("access_token"));
                assert!(detail.contains("user_id"));
            }
            other => panic!("expected CredentialsMissing, got {other:?}"),
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let config = GatewayConfig {
            access_token: Some(String::new()),
            user_id: Some("u-1".into()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::CredentialsMissing { detail } if detail == "access_token"));
    }

    #[test]
    fn default_url_applies() {
        let config = GatewayConfig {
            access_token: Some("tok".into()),
            user_id: Some("u-1".into()),
            ..Default::default()
        };
        let validated = config.validate().unwrap();
        assert_eq!(validated.base_url, DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn trailing_slash_trimmed() {
        let config = GatewayConfig {
            gateway_url: Some("https://gw.example.com/".into()),
            access_token: Some("tok".into()),
            user_id: Some("u-1".into()),
        };
        let validated = config.validate().unwrap();
        assert_eq!(validated.base_url, "https://gw.example.com");
    }

    #[test]
    fn non_http_scheme_rejected() {
        let config = GatewayConfig {
            gateway_url: Some("ftp://gw.example.com".into()),
            access_token: Some("tok".into()),
            user_id: Some("u-1".into()),
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::Configuration { .. }
        ));
    }
}
