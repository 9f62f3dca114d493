//! The availability engine: working hours + busy intervals → slot grid.
//!
//! For every day in the request range the engine lays candidate start times
//! from the start of that day's working window, `interval_minutes` apart, and
//! keeps each candidate whose full `duration_minutes` fits before the window
//! closes. A candidate is available when `[time, time + duration)` overlaps no
//! busy interval (half-open, so touching endpoints are not a conflict).
//! Unavailable candidates stay in the output so a consumer can render them
//! disabled.
//!
//! The computation is pure: no I/O, no shared state, and equal requests give
//! equal results.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::dst::resolve_local;
use crate::error::Result;
use crate::interval::{merge_intervals, TimeInterval};
use crate::request::AvailabilityRequest;
use crate::schedule::WorkingHours;

/// A candidate meeting start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// The local calendar day this slot belongs to.
    pub day: NaiveDate,
    /// Start instant of the meeting.
    pub time: DateTime<Utc>,
    /// `true` iff `[time, time + duration)` overlaps no busy interval.
    pub available: bool,
}

impl Slot {
    pub fn end(&self, duration_minutes: u32) -> DateTime<Utc> {
        self.time + Duration::minutes(i64::from(duration_minutes))
    }

    pub fn local_time(&self, tz: Tz) -> DateTime<Tz> {
        self.time.with_timezone(&tz)
    }
}

/// Slots for every day of the requested range, keyed and ordered by day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResult {
    pub timezone: Tz,
    pub duration_minutes: u32,
    pub days: BTreeMap<NaiveDate, Vec<Slot>>,
}

impl AvailabilityResult {
    /// Slots for `date`, or `None` if the date is outside the requested range.
    pub fn slots_for(&self, date: NaiveDate) -> Option<&[Slot]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// All available slots in chronological order.
    pub fn available_slots(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.days.values().flatten().filter(|s| s.available)
    }

    pub fn first_available(&self) -> Option<&Slot> {
        self.available_slots().next()
    }
}

/// Compute the slot grid for `request`.
///
/// # Errors
/// Fails with the first violated invariant (`InvalidRange`, `InvalidDuration`,
/// `InvalidInterval`, `InvalidWorkingHours`, `InvalidBusyInterval`) before any
/// slot is computed; a partial result is never returned.
pub fn compute_availability(request: &AvailabilityRequest) -> Result<AvailabilityResult> {
    request.validate()?;

    let duration = Duration::minutes(i64::from(request.duration_minutes));
    let step = Duration::minutes(i64::from(request.interval_minutes));

    let days = request
        .range_start
        .iter_days()
        .take_while(|d| *d < request.range_end)
        .map(|day| {
            let slots = match request.day_window.hours_for(day) {
                Some(hours) => match window_instants(request, day, hours) {
                    Some(window) => day_slots(day, window, duration, step, &request.busy),
                    None => Vec::new(),
                },
                None => Vec::new(),
            };
            (day, slots)
        })
        .collect();

    Ok(AvailabilityResult {
        timezone: request.timezone,
        duration_minutes: request.duration_minutes,
        days,
    })
}

/// Map a day's local working hours onto UTC instants.
///
/// Returns `None` when a boundary falls in a DST gap under `DstPolicy::Skip`,
/// when DST shifting collapses the window to nothing, or when a boundary lies
/// past the last representable date.
fn window_instants(
    request: &AvailabilityRequest,
    day: NaiveDate,
    hours: WorkingHours,
) -> Option<TimeInterval> {
    let midnight = day.and_time(NaiveTime::MIN);
    let local_from =
        midnight.checked_add_signed(Duration::minutes(i64::from(hours.from_minute())))?;
    let local_to = midnight.checked_add_signed(Duration::minutes(i64::from(hours.to_minute())))?;

    let from = resolve_local(request.timezone, local_from, request.dst_policy)?;
    let to = resolve_local(request.timezone, local_to, request.dst_policy)?;

    (from < to).then_some(TimeInterval { from, to })
}

fn day_slots(
    day: NaiveDate,
    window: TimeInterval,
    duration: Duration,
    step: Duration,
    busy: &[TimeInterval],
) -> Vec<Slot> {
    // Only busy time inside the window can collide with a slot.
    let blocked = merge_intervals(busy, window.from, window.to);

    let mut slots = Vec::new();
    let mut start = window.from;
    // An end past the last representable instant cannot fit in the window.
    while let Some(end) = start.checked_add_signed(duration).filter(|e| *e <= window.to) {
        let available = !blocked.iter().any(|b| b.overlaps_range(start, end));
        slots.push(Slot {
            day,
            time: start,
            available,
        });
        match start.checked_add_signed(step) {
            Some(next) => start = next,
            None => break,
        }
    }
    slots
}
