//! Rendering an `AvailabilityResult` for stdout.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use slot_engine::{AvailabilityResult, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `{"2021-03-03": [{"time": "09:00", "available": true}]}`
    Json,
    /// One line per slot: `2021-03-03 09:00 available`
    Text,
}

#[derive(Serialize)]
struct SlotDto {
    time: String,
    available: bool,
}

fn local_clock(result: &AvailabilityResult, slot: &Slot) -> String {
    slot.local_time(result.timezone).format("%H:%M").to_string()
}

/// Render the grid. With `only_available`, booked slots are left out.
pub fn render(result: &AvailabilityResult, format: Format, only_available: bool) -> Result<String> {
    let keep = |s: &&Slot| !only_available || s.available;

    match format {
        Format::Json => {
            let days: BTreeMap<String, Vec<SlotDto>> = result
                .days
                .iter()
                .map(|(day, slots)| {
                    let dtos = slots
                        .iter()
                        .filter(keep)
                        .map(|s| SlotDto {
                            time: local_clock(result, s),
                            available: s.available,
                        })
                        .collect();
                    (day.to_string(), dtos)
                })
                .collect();
            Ok(serde_json::to_string_pretty(&days)?)
        }
        Format::Text => {
            let mut out = String::new();
            for (day, slots) in &result.days {
                for slot in slots.iter().filter(keep) {
                    let state = if slot.available { "available" } else { "busy" };
                    out.push_str(&format!("{} {} {}\n", day, local_clock(result, slot), state));
                }
            }
            Ok(out)
        }
    }
}

/// Render a single slot, used by `slots next`.
pub fn render_one(result: &AvailabilityResult, slot: &Slot, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "date": slot.day.to_string(),
            "time": local_clock(result, slot),
            "start": slot.time.to_rfc3339(),
            "end": slot.end(result.duration_minutes).to_rfc3339(),
        }))?),
        Format::Text => Ok(format!("{} {}\n", slot.day, local_clock(result, slot))),
    }
}
