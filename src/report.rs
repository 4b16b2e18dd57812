//! Caller-facing rendering of call outcomes and errors.
//!
//! This is the boundary where errors become text: credential failures get
//! remediation instructions, while everything else surfaces the backend
//! message verbatim alongside any available hint.

use crate::error::{Error, ErrorCategory};
use crate::types::{CallResult, CallStatus};

/// Guidance shown when no credentials are configured at all.
pub const AUTH_MISSING_GUIDANCE: &str = "\
Voicegate is not authenticated yet. Both a user id and an access token are required before making calls.

To set up authentication:

  # Step 1: request a verification code (sent to your account email)
  voicegate auth request --email <EMAIL>

  # Step 2: enter the code from the email to obtain your user id and access token
  voicegate auth verify --email <EMAIL> --request-token <TOKEN> --code <CODE>

Then store user_id and access_token in the plugin configuration and restart the host.
Check the spam folder if the code does not arrive.";

/// Guidance shown when configured credentials are rejected by the gateway.
pub const AUTH_EXPIRED_GUIDANCE: &str = "\
Voicegate authentication has expired or is invalid.

To re-authenticate:

  voicegate auth request --email <EMAIL>
  voicegate auth verify --email <EMAIL> --request-token <TOKEN> --code <CODE>

Then update user_id and access_token in the plugin configuration and restart the host.";

/// Render an error for the caller.
pub fn render_error(error: &Error) -> String {
    match error.category() {
        ErrorCategory::Auth => match error {
            Error::CredentialsMissing { .. } => AUTH_MISSING_GUIDANCE.to_string(),
            _ => format!("{AUTH_EXPIRED_GUIDANCE}\n\n({error})"),
        },
        ErrorCategory::Timeout => format!(
            "{error}. The call may still be running; check its status again later."
        ),
        ErrorCategory::Backend => format!("Voice call error: {error}"),
    }
}

/// Render a finished call for the caller: short forms for failed and
/// cancelled calls, the full report (triage, duration, credits, summary,
/// transcript) for completed ones.
pub fn render_call_result(result: &CallResult) -> String {
    match result.status {
        CallStatus::Failed => {
            let reason = if result.summary.is_empty() {
                "unknown error"
            } else {
                result.summary.as_str()
            };
            format!("Call failed: {reason}")
        }
        CallStatus::Cancelled => "Call was cancelled.".to_string(),
        CallStatus::Completed => {
            let triage = result
                .triage_category
                .map(|t| t.as_str())
                .unwrap_or("unclassified");
            let minutes = result.duration_seconds / 60;
            let seconds = result.duration_seconds % 60;

            let mut lines = vec![
                format!("Call completed ({triage})"),
                format!(
                    "Duration: {minutes}m {seconds}s | Credits charged: {}",
                    result.credits_charged
                ),
                String::new(),
                format!("Summary: {}", result.summary),
            ];
            if !result.transcript.is_empty() {
                lines.push(String::new());
                lines.push("Transcript:".to_string());
                for entry in &result.transcript {
                    lines.push(format!("- {}: {}", entry.speaker, entry.text));
                }
            }
            lines.join("\n")
        }
    }
}
