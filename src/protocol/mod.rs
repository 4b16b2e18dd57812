//! Wire envelopes for the gateway's RPC endpoint.
//!
//! The gateway speaks four logical methods over a single POST endpoint,
//! each as one JSON-RPC 2.0 envelope in and one out. Session continuity is
//! carried out-of-band in headers (see [`crate::transport`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Protocol revision negotiated during `initialize`.
pub const PROTOCOL_VERSION: &str = "2025-11-25";

/// Version marker sent on every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Remote method names.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const NOTIFY_INITIALIZED: &str = "notifications/initialized";
    pub const CALL_TOOL: &str = "tools/call";
    pub const TASK_GET: &str = "tasks/get";
    pub const TASK_RESULT: &str = "tasks/result";
}

/// A single outgoing request or notification.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub jsonrpc: &'static str,
    /// Absent on notifications, which expect no response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestEnvelope {
    pub fn call(id: u64, method: &str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Some(id),
            method: method.to_string(),
            params,
        }
    }

    pub fn notification(method: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: None,
            method: method.to_string(),
            params: None,
        }
    }
}

/// A single response envelope, either a result or an error descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

/// Error descriptor carried by an error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    /// Unwrap the result, enforcing the envelope invariant: exactly one of
    /// result/error must be present. Both or neither is rejected outright
    /// rather than silently picking a field.
    pub fn into_result(self) -> Result<Value> {
        match (self.result, self.error) {
            (Some(_), Some(_)) => Err(Error::MalformedEnvelope {
                detail: "both result and error present".into(),
            }),
            (None, None) => Err(Error::MalformedEnvelope {
                detail: "neither result nor error present".into(),
            }),
            (None, Some(err)) => Err(Error::envelope(err.code, err.message, err.data)),
            (Some(result), None) => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(body: Value) -> ResponseEnvelope {
        serde_json::from_value(body).expect("envelope should deserialize")
    }

    #[test]
    fn notification_omits_id_and_params() {
        let body = serde_json::to_value(RequestEnvelope::notification(methods::NOTIFY_INITIALIZED))
            .unwrap();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "notifications/initialized");
        assert!(body.get("id").is_none());
        assert!(body.get("params").is_none());
    }

    #[test]
    fn call_carries_id() {
        let body =
            serde_json::to_value(RequestEnvelope::call(7, methods::TASK_GET, Some(json!({})))).unwrap();
        assert_eq!(body["id"], 7);
    }

    #[test]
    fn result_unwraps() {
        let value = envelope(json!({ "id": 1, "result": { "ok": true } }))
            .into_result()
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn error_envelope_propagates() {
        let err = envelope(json!({
            "id": 1,
            "error": { "code": -32000, "message": "call rejected" }
        }))
        .into_result()
        .unwrap_err();
        assert!(matches!(err, Error::Protocol { code: -32000, .. }));
    }

    #[test]
    fn both_fields_rejected() {
        let err = envelope(json!({
            "id": 1,
            "result": {},
            "error": { "code": -1, "message": "x" }
        }))
        .into_result()
        .unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope { .. }));
    }

    #[test]
    fn neither_field_rejected() {
        let err = envelope(json!({ "id": 1 })).into_result().unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope { .. }));
    }
}
