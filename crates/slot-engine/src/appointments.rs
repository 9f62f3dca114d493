//! Input adapter: existing appointments → busy intervals.
//!
//! Decodes the payload served by the appointments endpoint:
//!
//! ```json
//! {"appointments": [
//!   {"name": "Lunch with Mort",
//!    "startTime": "2021-03-03T12:00:00+0000",
//!    "endTime": "2021-03-03T13:00:00+0000"}
//! ]}
//! ```
//!
//! The `name` label is carried along but never interpreted.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

/// One existing appointment as delivered by the appointment source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl Appointment {
    /// Parse both timestamps and validate the resulting interval.
    ///
    /// # Errors
    /// `MalformedTimestamp` if either timestamp does not parse,
    /// `InvalidBusyInterval` if the end is not after the start.
    pub fn interval(&self) -> Result<TimeInterval> {
        let from = parse_timestamp(&self.start_time)?;
        let to = parse_timestamp(&self.end_time)?;
        TimeInterval::new(from, to)
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    appointments: Vec<Appointment>,
}

/// Decode an `{"appointments": [...]}` payload. A bare JSON array of
/// appointments is accepted too.
pub fn parse_payload(json: &str) -> Result<Vec<Appointment>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let appointments = if value.is_array() {
        serde_json::from_value::<Vec<Appointment>>(value)?
    } else {
        serde_json::from_value::<Payload>(value)?.appointments
    };
    tracing::debug!(count = appointments.len(), "decoded appointment payload");
    Ok(appointments)
}

/// Convert appointments to busy intervals, failing on the first bad record.
pub fn busy_intervals(appointments: &[Appointment]) -> Result<Vec<TimeInterval>> {
    appointments
        .iter()
        .map(|a| {
            a.interval()
                .inspect(|i| {
                    tracing::debug!(name = %a.name, from = %i.from, to = %i.to, "busy interval")
                })
                .inspect_err(|e| tracing::warn!(name = %a.name, error = %e, "rejected appointment"))
        })
        .collect()
}

/// Parse an ISO 8601 timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (`2021-03-03T12:00:00+00:00`, `...Z`), compact offsets
/// (`2021-03-03T12:00:00+0000`), and naive local time
/// (`2021-03-03T12:00:00` or `2021-03-03T12:00`), which is read as UTC.
///
/// # Errors
/// Returns `SlotError::MalformedTimestamp` when no format matches.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc());
        }
    }

    Err(SlotError::MalformedTimestamp(s.to_string()))
}
