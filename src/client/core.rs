use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::ValidatedConfig;
use crate::protocol::{methods, PROTOCOL_VERSION};
use crate::transport::HttpTransport;
use crate::types::{CallRequest, CallResult, Task};
use crate::Result;

/// Client identity advertised during `initialize`.
const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Job kind submitted for voice calls.
pub(crate) const VOICE_CALL_TOOL: &str = "voice_call";

/// Client for the gateway's task-oriented RPC contract.
///
/// Each operation maps 1:1 to a remote method. [`GatewayClient::initialize`]
/// must be called exactly once per session before any other operation; this
/// precondition is documented rather than checked.
#[derive(Debug)]
pub struct GatewayClient {
    transport: HttpTransport,
}

#[derive(Deserialize)]
struct SubmitResult {
    task: Task,
}

impl GatewayClient {
    pub fn builder() -> super::GatewayClientBuilder {
        super::GatewayClientBuilder::new()
    }

    /// Build a client from boundary-validated configuration.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self> {
        let transport = HttpTransport::new(
            &config.base_url,
            &config.credentials.access_token,
            &config.credentials.user_id,
        )?;
        Ok(Self { transport })
    }

    pub(crate) fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Negotiate protocol version and capabilities, then fire the one-way
    /// `initialized` notification (no response awaited, not retried).
    pub async fn initialize(&self) -> Result<()> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": { "name": CLIENT_NAME, "version": CLIENT_VERSION },
        });
        let response = self.transport.send(methods::INITIALIZE, Some(params)).await?;
        response.into_result()?;

        self.transport.notify(methods::NOTIFY_INITIALIZED).await;
        debug!("gateway session initialized");
        Ok(())
    }

    /// Submit a voice-call job with the given time-to-live. Returns the
    /// accepted task handle.
    pub async fn submit_call(&self, request: &CallRequest, ttl: Duration) -> Result<Task> {
        let params = json!({
            "name": VOICE_CALL_TOOL,
            "arguments": request,
            "task": { "ttl": ttl.as_millis() as u64 },
        });
        let response = self.transport.send(methods::CALL_TOOL, Some(params)).await?;
        let submitted: SubmitResult = serde_json::from_value(response.into_result()?)?;
        info!(task_id = %submitted.task.task_id, "call task accepted");
        Ok(submitted.task)
    }

    /// Fetch the task exactly as the gateway reports it (status, message,
    /// timestamps, hints).
    pub async fn fetch_status(&self, task_id: &str) -> Result<Task> {
        let response = self
            .transport
            .send(methods::TASK_GET, Some(json!({ "taskId": task_id })))
            .await?;
        Ok(serde_json::from_value(response.into_result()?)?)
    }

    /// Fetch the structured result of a terminal task.
    ///
    /// The gateway wraps the payload in `structuredContent`; older gateway
    /// revisions return it bare, so both shapes are accepted.
    pub async fn fetch_result(&self, task_id: &str) -> Result<CallResult> {
        let response = self
            .transport
            .send(methods::TASK_RESULT, Some(json!({ "taskId": task_id })))
            .await?;
        let result = response.into_result()?;
        let call_result = match result.get("structuredContent") {
            Some(inner) => serde_json::from_value(inner.clone())?,
            None => serde_json::from_value(result)?,
        };
        Ok(call_result)
    }

    /// Replace the bearer credential and clear the session token, forcing
    /// the next operation to re-establish a session.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.transport.set_access_token(token);
    }
}
