//! Half-open time intervals and busy-period merging.
//!
//! All intervals are `[from, to)`. Two intervals overlap when
//! `a.from < b.to && b.from < a.to`; intervals that merely touch (one ends
//! exactly when the other starts) do NOT overlap.

use chrono::{DateTime, Utc};

use crate::error::{Result, SlotError};

/// A half-open `[from, to)` span of time, e.g. an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeInterval {
    /// Build an interval, rejecting zero-length and inverted spans.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidBusyInterval` if `from >= to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        let interval = Self { from, to };
        interval.validate()?;
        Ok(interval)
    }

    /// Re-check the `from < to` invariant. Fields are public, so values built
    /// with a struct literal are only trusted after this passes.
    pub fn validate(&self) -> Result<()> {
        if self.from >= self.to {
            return Err(SlotError::InvalidBusyInterval {
                from: self.from.to_rfc3339(),
                to: self.to.to_rfc3339(),
            });
        }
        Ok(())
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.to - self.from).num_minutes()
    }

    /// Half-open overlap test against another interval.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.overlaps_range(other.from, other.to)
    }

    /// Half-open overlap test against `[start, end)`.
    ///
    /// Excludes the adjacent case where `self.to == start` or `end == self.from`.
    pub fn overlaps_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.to && self.from < end
    }
}

/// Clip intervals to `[clip_start, clip_end)`, then merge overlapping or
/// touching ones.
///
/// Returns a sorted, non-overlapping list. The union of the output equals the
/// union of the clipped input, so any `[a, b)` inside the clip window overlaps
/// the output iff it overlaps one of the input intervals.
pub fn merge_intervals(
    intervals: &[TimeInterval],
    clip_start: DateTime<Utc>,
    clip_end: DateTime<Utc>,
) -> Vec<TimeInterval> {
    let mut clipped: Vec<TimeInterval> = intervals
        .iter()
        .filter(|i| i.overlaps_range(clip_start, clip_end))
        .map(|i| TimeInterval {
            from: i.from.max(clip_start),
            to: i.to.min(clip_end),
        })
        .collect();

    if clipped.is_empty() {
        return Vec::new();
    }

    clipped.sort_by_key(|i| (i.from, i.to));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(clipped.len());
    for interval in clipped {
        if let Some(last) = merged.last_mut() {
            if interval.from <= last.to {
                last.to = last.to.max(interval.to);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
