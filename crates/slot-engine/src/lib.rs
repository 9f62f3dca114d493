//! # slot-engine
//!
//! Deterministic meeting-slot availability for booking UIs.
//!
//! Given a date range, a meeting duration, a slot interval, working hours per
//! weekday and a list of busy intervals, the engine produces for each day the
//! full grid of candidate start times, each flagged available or not.
//!
//! ## Modules
//!
//! - [`engine`] — `compute_availability`: request → per-day slot grid
//! - [`request`] — validated `AvailabilityRequest`
//! - [`schedule`] — working hours per weekday (`DayWindow`, `WorkingHours`)
//! - [`interval`] — half-open `TimeInterval`, overlap test, busy merging
//! - [`dst`] — DST gap policy for working-window boundaries
//! - [`appointments`] — appointment payload → busy intervals
//! - [`error`] — Error types

pub mod appointments;
pub mod dst;
pub mod engine;
pub mod error;
pub mod interval;
pub mod request;
pub mod schedule;

pub use appointments::{busy_intervals, parse_payload, parse_timestamp, Appointment};
pub use dst::DstPolicy;
pub use engine::{compute_availability, AvailabilityResult, Slot};
pub use error::SlotError;
pub use interval::TimeInterval;
pub use request::AvailabilityRequest;
pub use schedule::{DayWindow, WorkingHours};
