//! # voicegate
//!
//! Client for the Voicegate voice-call gateway. An AI agent places a phone
//! call as a long-running gateway task, polls it to completion under a
//! deadline, and retrieves the structured outcome (summary, transcript,
//! triage category). The crate also carries the email-code auth flow used
//! to obtain API credentials, and a reporting layer that turns outcomes and
//! errors into caller-facing text.
//!
//! ## Protocol
//!
//! The gateway speaks four logical methods over a single POST endpoint,
//! each as one JSON-RPC 2.0 envelope: `initialize` (session handshake,
//! followed by a one-way `notifications/initialized`), `tools/call` (job
//! submission), `tasks/get` (status query), and `tasks/result` (result
//! query). Session continuity is carried via a response header echoed back
//! on subsequent requests; request ids are strictly increasing per session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use voicegate::{CallRequest, GatewayClient, TaskStatus, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> voicegate::Result<()> {
//!     let client = GatewayClient::builder()
//!         .access_token("your-access-token")
//!         .user_id("your-user-id")
//!         .build()?;
//!
//!     client.initialize().await?;
//!
//!     let request = CallRequest::new(
//!         "+14155551234",
//!         "Front desk",
//!         "Hotel reception; reservation under Smith for Friday.",
//!         "Confirm the reservation and ask for early check-in.",
//!     );
//!     let task = client
//!         .submit_call(&request, Duration::from_secs(30 * 60))
//!         .await?;
//!
//!     let done = client
//!         .wait_for_task(&task.task_id, WaitOptions::new(Duration::from_secs(35 * 60)))
//!         .await?;
//!
//!     if done.status == TaskStatus::Completed {
//!         let result = client.fetch_result(&done.task_id).await?;
//!         println!("{}", voicegate::report::render_call_result(&result));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`transport`] | Session transport: single-endpoint request/response, session token lifecycle |
//! | [`protocol`] | Wire envelopes and remote method names |
//! | [`client`] | [`GatewayClient`]: the four remote operations plus task polling |
//! | [`types`] | Task and call payload types |
//! | [`auth`] | Email-code credential flow |
//! | [`config`] | Boundary-validated gateway configuration |
//! | [`report`] | Caller-facing rendering of outcomes and errors |

pub mod auth;
pub mod client;
pub mod config;
pub mod protocol;
pub mod report;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{GatewayClient, GatewayClientBuilder, WaitOptions, DEFAULT_POLL_INTERVAL};
pub use config::{Credentials, GatewayConfig, ValidatedConfig};
pub use types::{
    CallRequest, CallResult, CallStatus, Task, TaskStatus, TranscriptEntry, TriageCategory, Voice,
};

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorCategory};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
