//! WASM bindings for slot-engine.
//!
//! Exposes the availability grid to a browser booking page via
//! `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{
    busy_intervals, parse_payload, AvailabilityRequest, AvailabilityResult, DayWindow, DstPolicy,
    Slot, TimeInterval, WorkingHours,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Options object passed from JavaScript.
///
/// ```json
/// {"from": "2021-03-03", "to": "2021-03-04", "duration": 60, "interval": 30,
///  "weekdays": {"from": "09:00", "to": "17:00"}, "timezone": "UTC"}
/// ```
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityOptions {
    from: NaiveDate,
    /// Exclusive; defaults to the day after `from`.
    to: Option<NaiveDate>,
    duration: u32,
    interval: u32,
    /// Hours applied Monday to Friday.
    weekdays: Option<ClockRange>,
    /// Hours applied to every day; `weekdays` and named days refine it.
    all_days: Option<ClockRange>,
    #[serde(default)]
    days: BTreeMap<String, Option<ClockRange>>,
    timezone: Option<String>,
    dst_policy: Option<DstPolicy>,
}

#[derive(Deserialize)]
struct ClockRange {
    from: String,
    to: String,
}

impl ClockRange {
    fn hours(&self) -> Result<WorkingHours, JsValue> {
        WorkingHours::parse(&self.from, &self.to).map_err(to_js)
    }
}

#[derive(Serialize)]
struct SlotDto {
    time: String,
    available: bool,
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn weekday(name: &str) -> Result<chrono::Weekday, JsValue> {
    name.parse::<chrono::Weekday>()
        .map_err(|_| JsValue::from_str(&format!("Unknown weekday: '{}'", name)))
}

fn day_window(options: &AvailabilityOptions) -> Result<DayWindow, JsValue> {
    let mut window = DayWindow::new();
    if let Some(range) = &options.all_days {
        window = window.with_all_days(range.hours()?);
    }
    if let Some(range) = &options.weekdays {
        window = window.with_weekdays(range.hours()?);
    }
    for (name, range) in &options.days {
        let day = weekday(name)?;
        window = match range {
            Some(range) => window.with_day(day, range.hours()?),
            None => window.without_day(day),
        };
    }
    Ok(window)
}

fn build_request(options_json: &str, busy: Vec<TimeInterval>) -> Result<AvailabilityRequest, JsValue> {
    let options: AvailabilityOptions = serde_json::from_str(options_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid options JSON: {}", e)))?;

    let window = day_window(&options)?;
    let timezone: Tz = match options.timezone.as_deref() {
        Some(name) => name
            .parse()
            .map_err(|_| JsValue::from_str(&format!("Invalid timezone: {}", name)))?,
        None => Tz::UTC,
    };

    let request = match options.to {
        Some(to) => {
            AvailabilityRequest::new(options.from, to, options.duration, options.interval, window)
        }
        None => AvailabilityRequest::for_date(options.from, options.duration, options.interval, window),
    }
    .and_then(|r| r.with_busy(busy))
    .map_err(to_js)?;

    Ok(request
        .with_timezone(timezone)
        .with_dst_policy(options.dst_policy.unwrap_or_default()))
}

/// Shape the result the way booking pages consume it:
/// `{"2021-03-03": [{"time": "09:00", "available": true}, ...]}`.
fn grid_dto(result: &AvailabilityResult) -> BTreeMap<String, Vec<SlotDto>> {
    let local = |s: &Slot| s.local_time(result.timezone).format("%H:%M").to_string();
    result
        .days
        .iter()
        .map(|(day, slots)| {
            let dtos = slots
                .iter()
                .map(|s| SlotDto {
                    time: local(s),
                    available: s.available,
                })
                .collect();
            (day.to_string(), dtos)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the slot grid.
///
/// `options_json` is an options object (see `AvailabilityOptions`).
/// `appointments_json` is the appointments endpoint payload,
/// `{"appointments": [{"name", "startTime", "endTime"}]}`, or a bare array.
/// Returns a JSON object keyed by date.
#[wasm_bindgen(js_name = "getAvailability")]
pub fn get_availability(options_json: &str, appointments_json: &str) -> Result<String, JsValue> {
    let appointments = parse_payload(appointments_json).map_err(to_js)?;
    let busy = busy_intervals(&appointments).map_err(to_js)?;
    let request = build_request(options_json, busy)?;

    let result = slot_engine::compute_availability(&request).map_err(to_js)?;

    serde_json::to_string(&grid_dto(&result))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Return the first available slot as `{date, time, start, end}`, or `null`.
#[wasm_bindgen(js_name = "firstAvailable")]
pub fn first_available(options_json: &str, appointments_json: &str) -> Result<String, JsValue> {
    let appointments = parse_payload(appointments_json).map_err(to_js)?;
    let busy = busy_intervals(&appointments).map_err(to_js)?;
    let request = build_request(options_json, busy)?;

    let result = slot_engine::compute_availability(&request).map_err(to_js)?;

    let value = match result.first_available() {
        Some(slot) => serde_json::json!({
            "date": slot.day.to_string(),
            "time": slot.local_time(result.timezone).format("%H:%M").to_string(),
            "start": slot.time.to_rfc3339(),
            "end": slot.end(result.duration_minutes).to_rfc3339(),
        }),
        None => serde_json::Value::Null,
    };
    serde_json::to_string(&value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
