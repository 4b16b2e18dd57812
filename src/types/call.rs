//! Domain payloads for voice calls.

use serde::{Deserialize, Serialize};

/// Upper bound the gateway enforces on call duration.
pub const MAX_CALL_DURATION_MINUTES: u32 = 120;

/// Voice gender for the calling agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Male,
    Female,
}

/// Arguments for a voice-call job.
///
/// The calling agent cannot reach a human for missing information mid-call,
/// so `callee_context` should carry everything the callee may ask for
/// (verification, payment details, account numbers) upfront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    /// Phone number to call, E.164 format.
    pub to: String,
    /// Name of the person or business being called.
    pub callee_name: String,
    /// Who the callee is, the caller's relationship to them, and every
    /// detail the call may need.
    pub callee_context: String,
    /// The specific goal the call should accomplish.
    pub objective: String,
    /// Detailed strategy for the agent: leverage points, acceptable
    /// offers, fallback positions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_minutes: Option<u32>,
}

impl CallRequest {
    pub fn new(
        to: impl Into<String>,
        callee_name: impl Into<String>,
        callee_context: impl Into<String>,
        objective: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            callee_name: callee_name.into(),
            callee_context: callee_context.into(),
            objective: objective.into(),
            instructions: None,
            voice: None,
            max_duration_minutes: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Clamped to 1..=[`MAX_CALL_DURATION_MINUTES`].
    pub fn with_max_duration_minutes(mut self, minutes: u32) -> Self {
        self.max_duration_minutes = Some(minutes.clamp(1, MAX_CALL_DURATION_MINUTES));
        self
    }
}

/// Outcome status of a finished call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Completed,
    Failed,
    Cancelled,
}

/// Backend-assigned outcome classification for a completed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageCategory {
    Successful,
    PartiallySuccessful,
    Unsuccessful,
    NoContact,
}

impl TriageCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TriageCategory::Successful => "successful",
            TriageCategory::PartiallySuccessful => "partially_successful",
            TriageCategory::Unsuccessful => "unsuccessful",
            TriageCategory::NoContact => "no_contact",
        }
    }
}

/// One utterance in the call transcript, in speaking order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
}

/// The domain payload of a completed call task. Produced once per task,
/// read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResult {
    pub call_id: String,
    pub status: CallStatus,
    #[serde(default)]
    pub duration_seconds: u64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    /// Absent when the gateway could not classify the call (e.g. failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_category: Option<TriageCategory>,
    #[serde(default)]
    pub credits_charged: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_without_empty_optionals() {
        let request = CallRequest::new("+14155551234", "Front desk", "Hotel reception", "Confirm booking");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["to"], "+14155551234");
        assert!(body.get("instructions").is_none());
        assert!(body.get("voice").is_none());
    }

    #[test]
    fn max_duration_clamped() {
        let request = CallRequest::new("+1", "a", "b", "c").with_max_duration_minutes(500);
        assert_eq!(request.max_duration_minutes, Some(MAX_CALL_DURATION_MINUTES));
        let request = CallRequest::new("+1", "a", "b", "c").with_max_duration_minutes(0);
        assert_eq!(request.max_duration_minutes, Some(1));
    }

    #[test]
    fn result_deserializes_backend_shape() {
        let result: CallResult = serde_json::from_value(json!({
            "call_id": "call-9",
            "status": "completed",
            "duration_seconds": 95,
            "summary": "Reservation confirmed for Friday.",
            "transcript": [
                { "speaker": "agent", "text": "Hello, calling to confirm a reservation." },
                { "speaker": "callee", "text": "Confirmed, see you Friday." }
            ],
            "triage_category": "successful",
            "credits_charged": 1.5
        }))
        .unwrap();
        assert_eq!(result.status, CallStatus::Completed);
        assert_eq!(result.triage_category, Some(TriageCategory::Successful));
        assert_eq!(result.transcript.len(), 2);
    }

    #[test]
    fn failed_result_without_triage() {
        let result: CallResult = serde_json::from_value(json!({
            "call_id": "call-10",
            "status": "failed",
            "summary": "Number unreachable"
        }))
        .unwrap();
        assert_eq!(result.status, CallStatus::Failed);
        assert_eq!(result.triage_category, None);
        assert_eq!(result.duration_seconds, 0);
    }
}
