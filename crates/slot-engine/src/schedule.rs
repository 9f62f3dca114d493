//! Working hours per weekday, with optional per-date overrides.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{Result, SlotError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A local clock-of-day window, stored as minutes after midnight.
///
/// `0 <= from_minute < to_minute <= 1440`, so a window may end at `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkingHours {
    from_minute: u32,
    to_minute: u32,
}

impl WorkingHours {
    /// # Errors
    /// Returns `SlotError::InvalidWorkingHours` unless `from < to <= 1440`.
    pub fn new(from_minute: u32, to_minute: u32) -> Result<Self> {
        if to_minute > MINUTES_PER_DAY {
            return Err(SlotError::InvalidWorkingHours(format!(
                "end {} is past 24:00",
                format_clock(to_minute)
            )));
        }
        if from_minute >= to_minute {
            return Err(SlotError::InvalidWorkingHours(format!(
                "end {} is not after start {}",
                format_clock(to_minute),
                format_clock(from_minute)
            )));
        }
        Ok(Self {
            from_minute,
            to_minute,
        })
    }

    /// Build from two `HH:MM` clock strings, e.g. `parse("08:00", "17:00")`.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::new(parse_clock(from)?, parse_clock(to)?)
    }

    pub fn from_minute(&self) -> u32 {
        self.from_minute
    }

    pub fn to_minute(&self) -> u32 {
        self.to_minute
    }

    pub fn len_minutes(&self) -> u32 {
        self.to_minute - self.from_minute
    }
}

impl fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_clock(self.from_minute),
            format_clock(self.to_minute)
        )
    }
}

impl FromStr for WorkingHours {
    type Err = SlotError;

    /// Parse `"08:00-17:00"`.
    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s.split_once('-').ok_or_else(|| {
            SlotError::InvalidWorkingHours(format!("expected HH:MM-HH:MM, got '{}'", s))
        })?;
        Self::parse(from.trim(), to.trim())
    }
}

/// Parse an `H:MM` or `HH:MM` clock string into minutes after midnight.
/// `24:00` is accepted. Signs, whitespace and one-digit minutes are not.
pub fn parse_clock(s: &str) -> Result<u32> {
    let malformed = || SlotError::MalformedTimestamp(s.to_string());

    let (h, m) = s.split_once(':').ok_or_else(malformed)?;
    let digits = |part: &str, max_len: usize| {
        (1..=max_len).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(h, 2) || !digits(m, 2) || m.len() != 2 {
        return Err(malformed());
    }
    let hours: u32 = h.parse().map_err(|_| malformed())?;
    let minutes: u32 = m.parse().map_err(|_| malformed())?;

    if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}

pub(crate) fn format_clock(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// When bookings are allowed, per weekday.
///
/// A weekday with no entry is closed. Per-date overrides take precedence over
/// the weekday entry; an override of `None` closes that date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayWindow {
    weekdays: [Option<WorkingHours>; 7],
    overrides: BTreeMap<NaiveDate, Option<WorkingHours>>,
}

impl DayWindow {
    /// A window with every day closed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, weekday: Weekday, hours: WorkingHours) -> Self {
        self.weekdays[weekday.num_days_from_monday() as usize] = Some(hours);
        self
    }

    /// Open Monday through Friday with the same hours.
    pub fn with_weekdays(mut self, hours: WorkingHours) -> Self {
        for slot in &mut self.weekdays[..5] {
            *slot = Some(hours);
        }
        self
    }

    pub fn with_all_days(mut self, hours: WorkingHours) -> Self {
        self.weekdays = [Some(hours); 7];
        self
    }

    pub fn without_day(mut self, weekday: Weekday) -> Self {
        self.weekdays[weekday.num_days_from_monday() as usize] = None;
        self
    }

    /// Override a single calendar date. `None` closes it.
    pub fn with_date(mut self, date: NaiveDate, hours: Option<WorkingHours>) -> Self {
        self.overrides.insert(date, hours);
        self
    }

    pub fn weekday(&self, weekday: Weekday) -> Option<WorkingHours> {
        self.weekdays[weekday.num_days_from_monday() as usize]
    }

    /// Working hours that apply on `date`, if it is open.
    pub fn hours_for(&self, date: NaiveDate) -> Option<WorkingHours> {
        match self.overrides.get(&date) {
            Some(hours) => *hours,
            None => self.weekday(date.weekday()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.weekdays.iter().all(Option::is_none)
            && self.overrides.values().all(Option::is_none)
    }

    /// Re-check every entry against the `WorkingHours` invariant.
    pub fn validate(&self) -> Result<()> {
        self.weekdays
            .iter()
            .chain(self.overrides.values())
            .flatten()
            .try_for_each(|h| WorkingHours::new(h.from_minute, h.to_minute).map(|_| ()))
    }
}
