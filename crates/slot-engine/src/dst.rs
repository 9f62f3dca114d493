//! DST handling for working-window boundaries.
//!
//! Working hours are local clock-of-day values. Mapping them onto instants in
//! a timezone can hit a spring-forward gap (the local time does not exist) or
//! a fall-back overlap (the local time exists twice).

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{Result, SlotError};

/// Longest DST gap in the tz database is two hours; search a little beyond it.
const MAX_GAP_MINUTES: i64 = 180;

/// Policy for a working-window boundary that falls in a DST gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DstPolicy {
    /// Treat the day as closed when either boundary does not exist.
    Skip,
    /// Move the boundary to the first valid local time after the gap.
    #[default]
    ShiftForward,
}

impl std::str::FromStr for DstPolicy {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(DstPolicy::Skip),
            "shift-forward" => Ok(DstPolicy::ShiftForward),
            other => Err(SlotError::InvalidDstPolicy(other.to_string())),
        }
    }
}

/// Resolve a local wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times resolve to the earliest instant. Non-existent times are
/// handled per `policy`; `None` means the boundary could not be placed.
pub fn resolve_local(tz: Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt.with_timezone(&Utc));
    }

    match policy {
        DstPolicy::Skip => None,
        DstPolicy::ShiftForward => (1..=MAX_GAP_MINUTES).find_map(|m| {
            let shifted = local.checked_add_signed(Duration::minutes(m))?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    }
}
