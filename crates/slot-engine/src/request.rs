//! The immutable input to one availability computation.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;
use crate::schedule::DayWindow;

/// Everything the engine needs to lay out a slot grid.
///
/// Days in `[range_start, range_end)` and the working hours in `day_window`
/// are read in `timezone`; busy intervals and slot times are UTC instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub duration_minutes: u32,
    pub interval_minutes: u32,
    pub day_window: DayWindow,
    pub busy: Vec<TimeInterval>,
    pub timezone: Tz,
    pub dst_policy: DstPolicy,
}

impl AvailabilityRequest {
    /// Build a request with no busy intervals, in UTC.
    ///
    /// # Errors
    /// Returns `InvalidRange`, `InvalidDuration`, `InvalidInterval` or
    /// `InvalidWorkingHours` when the corresponding invariant does not hold.
    pub fn new(
        range_start: NaiveDate,
        range_end: NaiveDate,
        duration_minutes: u32,
        interval_minutes: u32,
        day_window: DayWindow,
    ) -> Result<Self> {
        let request = Self {
            range_start,
            range_end,
            duration_minutes,
            interval_minutes,
            day_window,
            busy: Vec::new(),
            timezone: Tz::UTC,
            dst_policy: DstPolicy::default(),
        };
        request.validate()?;
        Ok(request)
    }

    /// A single-day request covering `[date, date + 1)`.
    pub fn for_date(
        date: NaiveDate,
        duration_minutes: u32,
        interval_minutes: u32,
        day_window: DayWindow,
    ) -> Result<Self> {
        let next = date
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| SlotError::InvalidRange {
                start: date.to_string(),
                end: "out of range".to_string(),
            })?;
        Self::new(date, next, duration_minutes, interval_minutes, day_window)
    }

    /// Attach busy intervals. Each one is validated.
    pub fn with_busy<I>(mut self, busy: I) -> Result<Self>
    where
        I: IntoIterator<Item = TimeInterval>,
    {
        for interval in busy {
            interval.validate()?;
            self.busy.push(interval);
        }
        Ok(self)
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    /// Number of calendar days in `[range_start, range_end)`.
    pub fn day_count(&self) -> i64 {
        (self.range_end - self.range_start).num_days().max(0)
    }

    /// Check every invariant. The engine calls this before computing anything.
    pub fn validate(&self) -> Result<()> {
        if self.range_start >= self.range_end {
            return Err(SlotError::InvalidRange {
                start: self.range_start.to_string(),
                end: self.range_end.to_string(),
            });
        }
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        if self.interval_minutes == 0 {
            return Err(SlotError::InvalidInterval(self.interval_minutes));
        }
        self.day_window.validate()?;
        self.busy.iter().try_for_each(TimeInterval::validate)
    }
}
