//! Core type definitions (tasks, call payloads).

pub mod call;
pub mod task;

pub use call::{
    CallRequest, CallResult, CallStatus, TranscriptEntry, TriageCategory, Voice,
    MAX_CALL_DURATION_MINUTES,
};
pub use task::{Task, TaskStatus};
