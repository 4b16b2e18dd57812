//! Crate error taxonomy.
//!
//! Every error preserves the raw backend signal (HTTP status, structured
//! code, message) so the reporting layer can tell credential failures apart
//! from transient backend failures without re-parsing free text.

use std::time::Duration;

use thiserror::Error;

/// Structured error codes the gateway uses for credential failures.
const AUTH_CODES: &[&str] = &["TOKEN_EXPIRED", "UNAUTHORIZED", "INVALID_TOKEN"];

/// Fallback substrings checked when no structured code is available.
const AUTH_MESSAGE_SIGNALS: &[&str] = &["401", "TOKEN_EXPIRED", "Unauthorized", "expired"];

/// Caller-facing error category, consumed by the reporting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing, invalid, or expired credential.
    Auth,
    /// The poll deadline elapsed without a terminal task status.
    Timeout,
    /// Any other transport- or application-level failure.
    Backend,
}

/// Unified error type for the gateway client.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-2xx response from the gateway endpoint.
    #[error("gateway returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Well-formed error envelope from the gateway.
    #[error("gateway error {code}: {message}")]
    Protocol {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Credential-related failure, reclassified from a transport or protocol
    /// error that carried an authentication signal.
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        /// Structured code when the gateway supplied one (e.g. `TOKEN_EXPIRED`).
        code: Option<String>,
        /// HTTP status when the signal came from the transport layer.
        status: Option<u16>,
    },

    /// The poll deadline elapsed before the task reached a terminal status.
    #[error("timed out after {waited:?} waiting for task {task_id}")]
    Timeout { task_id: String, waited: Duration },

    /// Response envelope violated the exactly-one-of result/error invariant.
    #[error("malformed response envelope: {detail}")]
    MalformedEnvelope { detail: String },

    /// Required credential fields absent from the configuration. Surfaced
    /// before any network call is attempted.
    #[error("credentials missing: {detail}")]
    CredentialsMissing { detail: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build the error for a non-2xx response, reclassifying credential
    /// signals (401, or a recognizable body) as [`Error::Auth`].
    pub(crate) fn transport(status: u16, body: String) -> Self {
        if status == 401 || auth_signal(None, &body) {
            Error::Auth {
                message: format!("HTTP {status}: {body}"),
                code: None,
                status: Some(status),
            }
        } else {
            Error::Transport { status, body }
        }
    }

    /// Build the error for a gateway error envelope, reclassifying
    /// credential signals regardless of which method produced it.
    pub(crate) fn envelope(code: i64, message: String, data: Option<serde_json::Value>) -> Self {
        let structured_code = data
            .as_ref()
            .and_then(|d| d.get("code"))
            .and_then(|c| c.as_str())
            .map(str::to_owned);

        if auth_signal(structured_code.as_deref(), &message) {
            Error::Auth {
                message,
                code: structured_code,
                status: None,
            }
        } else {
            Error::Protocol {
                code,
                message,
                data,
            }
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Collapse into the three caller-facing categories without losing the
    /// underlying value.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Auth { .. } | Error::CredentialsMissing { .. } => ErrorCategory::Auth,
            Error::Timeout { .. } => ErrorCategory::Timeout,
            _ => ErrorCategory::Backend,
        }
    }
}

/// An error is credential-related when its structured code is one the
/// gateway reserves for auth failures, or (absent a code) when the
/// message contains a known auth marker.
fn auth_signal(code: Option<&str>, message: &str) -> bool {
    if let Some(code) = code {
        if AUTH_CODES.contains(&code) {
            return true;
        }
    }
    AUTH_MESSAGE_SIGNALS.iter().any(|s| message.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transport_401_is_auth() {
        let err = Error::transport(401, "denied".into());
        assert!(matches!(err, Error::Auth { status: Some(401), .. }));
        assert_eq!(err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn transport_500_is_backend() {
        let err = Error::transport(500, "boom".into());
        assert!(matches!(err, Error::Transport { status: 500, .. }));
        assert_eq!(err.category(), ErrorCategory::Backend);
    }

    #[test]
    fn transport_body_signal_is_auth() {
        let err = Error::transport(403, "token expired, please re-authenticate".into());
        assert_eq!(err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn envelope_structured_code_wins() {
        let err = Error::envelope(
            -32000,
            "request rejected".into(),
            Some(json!({ "code": "TOKEN_EXPIRED" })),
        );
        match err {
            Error::Auth { code, .. } => assert_eq!(code.as_deref(), Some("TOKEN_EXPIRED")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn envelope_message_fallback() {
        for message in ["401 from upstream", "Unauthorized", "session expired"] {
            let err = Error::envelope(-32000, message.into(), None);
            assert_eq!(err.category(), ErrorCategory::Auth, "message: {message}");
        }
    }

    #[test]
    fn envelope_plain_error_stays_protocol() {
        let err = Error::envelope(-32602, "invalid params".into(), None);
        assert!(matches!(err, Error::Protocol { code: -32602, .. }));
        assert_eq!(err.category(), ErrorCategory::Backend);
    }

    #[test]
    fn timeout_category() {
        let err = Error::Timeout {
            task_id: "task-1".into(),
            waited: Duration::from_secs(30),
        };
        assert_eq!(err.category(), ErrorCategory::Timeout);
    }

    #[test]
    fn credentials_missing_is_auth_category() {
        let err = Error::CredentialsMissing {
            detail: "access_token".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Auth);
    }
}
