use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{compute_availability, AvailabilityRequest, DayWindow, TimeInterval, WorkingHours};
use std::hint::black_box;

/// Thirty days of 08:00-18:00 weekdays with a busy block every 95 minutes.
fn month_request() -> AvailabilityRequest {
    let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let end = start + Duration::days(30);
    let hours = WorkingHours::parse("08:00", "18:00").unwrap();
    let origin = start.and_time(NaiveTime::MIN).and_utc();

    let busy = (0..(30 * 24 * 60 / 95)).map(|i| {
        let from = origin + Duration::minutes(i * 95);
        TimeInterval {
            from,
            to: from + Duration::minutes(40),
        }
    });

    AvailabilityRequest::new(start, end, 30, 15, DayWindow::new().with_weekdays(hours))
        .unwrap()
        .with_busy(busy)
        .unwrap()
}

fn bench_month(c: &mut Criterion) {
    let request = month_request();
    c.bench_function("compute_availability/30d", |b| {
        b.iter(|| compute_availability(black_box(&request)).unwrap())
    });
}

fn bench_single_day(c: &mut Criterion) {
    let hours = WorkingHours::parse("00:00", "24:00").unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let request =
        AvailabilityRequest::for_date(date, 60, 5, DayWindow::new().with_all_days(hours)).unwrap();
    c.bench_function("compute_availability/1d_5min_grid", |b| {
        b.iter(|| compute_availability(black_box(&request)).unwrap())
    });
}

criterion_group!(benches, bench_month, bench_single_day);
criterion_main!(benches);
