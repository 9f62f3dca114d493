//! Optional TOML schedule file.
//!
//! ```toml
//! duration = 60
//! interval = 30
//! timezone = "Europe/Berlin"
//! dst_policy = "shift-forward"
//!
//! [hours]
//! weekdays = "09:00-17:00"
//! saturday = "10:00-14:00"
//!
//! [dates]
//! "2021-03-05" = "closed"
//! "2021-03-08" = "12:00-16:00"
//! ```
//!
//! `[hours]` keys are `all`, `weekdays`, or a weekday name; more specific keys
//! win regardless of order in the file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use slot_engine::{DayWindow, DstPolicy, WorkingHours};

pub const DEFAULT_DURATION: u32 = 60;
pub const DEFAULT_INTERVAL: u32 = 30;
pub const DEFAULT_HOURS: &str = "09:00-17:00";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub duration: Option<u32>,
    pub interval: Option<u32>,
    pub timezone: Option<String>,
    pub dst_policy: Option<DstPolicy>,
    #[serde(default)]
    pub hours: BTreeMap<String, String>,
    #[serde(default)]
    pub dates: BTreeMap<NaiveDate, String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }

    /// Build the weekly window from `[hours]` and `[dates]`.
    ///
    /// Returns `None` when the file has no `[hours]` table, so the caller can
    /// fall back to its own default.
    pub fn day_window(&self) -> Result<Option<DayWindow>> {
        let mut window = if self.hours.is_empty() {
            None
        } else {
            Some(self.weekly_hours()?)
        };

        if !self.dates.is_empty() {
            let mut w = window.take().unwrap_or_default();
            for (date, value) in &self.dates {
                let hours = match value.trim() {
                    "closed" => None,
                    other => Some(parse_hours(other)?),
                };
                w = w.with_date(*date, hours);
            }
            window = Some(w);
        }

        Ok(window)
    }

    fn weekly_hours(&self) -> Result<DayWindow> {
        let mut window = DayWindow::new();

        if let Some(v) = self.hours.get("all") {
            window = window.with_all_days(parse_hours(v)?);
        }
        if let Some(v) = self.hours.get("weekdays") {
            window = window.with_weekdays(parse_hours(v)?);
        }
        for (key, value) in &self.hours {
            if key == "all" || key == "weekdays" {
                continue;
            }
            let Some(day) = parse_weekday(key) else {
                bail!(
                    "Unknown [hours] key: '{}'. Expected all, weekdays, or a weekday name",
                    key
                );
            };
            window = match value.trim() {
                "closed" => window.without_day(day),
                other => window.with_day(day, parse_hours(other)?),
            };
        }

        Ok(window)
    }
}

pub fn parse_hours(s: &str) -> Result<WorkingHours> {
    s.parse::<WorkingHours>()
        .with_context(|| format!("Invalid working hours: '{}'", s))
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn specific_weekday_wins_over_weekdays() {
        let config: FileConfig = toml::from_str(
            r#"
            [hours]
            friday = "09:00-12:00"
            weekdays = "09:00-17:00"
            sun = "closed"
            "#,
        )
        .unwrap();

        let window = config.day_window().unwrap().unwrap();

        assert_eq!(window.weekday(Weekday::Mon), Some(parse_hours("09:00-17:00").unwrap()));
        assert_eq!(window.weekday(Weekday::Fri), Some(parse_hours("09:00-12:00").unwrap()));
        assert_eq!(window.weekday(Weekday::Sat), None);
        assert_eq!(window.weekday(Weekday::Sun), None);
    }

    #[test]
    fn dates_table_overrides_days() {
        let config: FileConfig = toml::from_str(
            r#"
            duration = 45
            [hours]
            all = "08:00-18:00"
            [dates]
            "2021-03-05" = "closed"
            "2021-03-06" = "10:00-11:00"
            "#,
        )
        .unwrap();

        let window = config.day_window().unwrap().unwrap();

        assert_eq!(config.duration, Some(45));
        assert_eq!(window.hours_for(date(2021, 3, 5)), None);
        assert_eq!(
            window.hours_for(date(2021, 3, 6)),
            Some(parse_hours("10:00-11:00").unwrap())
        );
        assert_eq!(
            window.hours_for(date(2021, 3, 7)),
            Some(parse_hours("08:00-18:00").unwrap())
        );
    }

    #[test]
    fn empty_config_has_no_window() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.day_window().unwrap().is_none());
    }

    #[test]
    fn unknown_hours_key_is_an_error() {
        let config: FileConfig = toml::from_str("[hours]\nfunday = \"09:00-10:00\"").unwrap();
        assert!(config.day_window().is_err());
    }

    #[test]
    fn dst_policy_is_kebab_case() {
        let config: FileConfig = toml::from_str("dst_policy = \"skip\"").unwrap();
        assert_eq!(config.dst_policy, Some(DstPolicy::Skip));
    }
}
