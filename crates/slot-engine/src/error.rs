//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid range: start {start} is not before end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(u32),

    #[error("Invalid interval: {0} minutes (must be positive)")]
    InvalidInterval(u32),

    #[error("Invalid busy interval: end {to} is not after start {from}")]
    InvalidBusyInterval { from: String, to: String },

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Malformed timestamp: '{0}'")]
    MalformedTimestamp(String),

    #[error("Invalid DST policy: '{0}' (expected skip or shift-forward)")]
    InvalidDstPolicy(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid appointment payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
