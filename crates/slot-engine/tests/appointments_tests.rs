//! Tests for decoding appointment payloads into busy intervals.

use chrono::{TimeZone, Utc};
use slot_engine::{busy_intervals, parse_payload, parse_timestamp, Appointment, SlotError};

const MOCK_PAYLOAD: &str = r#"{
  "appointments": [
    {"name": "Lunch with Mort", "startTime": "2021-03-03T12:00:00+0000", "endTime": "2021-03-03T13:00:00+0000"},
    {"name": "Morning Meeting", "startTime": "2021-03-03T09:00:00+0000", "endTime": "2021-03-03T09:30:00+0000"},
    {"name": "Exit Interviews", "startTime": "2021-03-03T14:00:00+0000", "endTime": "2021-03-03T17:30:00+0000"},
    {"name": "Exit Interview - Jack Sparrow", "startTime": "2021-03-03T15:30:00+0000", "endTime": "2021-03-03T15:45:00+0000"}
  ]
}"#;

fn appointment(start: &str, end: &str) -> Appointment {
    Appointment {
        name: "x".to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

#[test]
fn decodes_mock_endpoint_payload() {
    let appointments = parse_payload(MOCK_PAYLOAD).unwrap();

    assert_eq!(appointments.len(), 4);
    assert_eq!(appointments[0].name, "Lunch with Mort");
    assert_eq!(appointments[1].start_time, "2021-03-03T09:00:00+0000");
}

#[test]
fn decodes_bare_array() {
    let json = r#"[{"name": "a", "startTime": "2021-03-03T09:00:00Z", "endTime": "2021-03-03T10:00:00Z"}]"#;
    assert_eq!(parse_payload(json).unwrap().len(), 1);
}

#[test]
fn invalid_json_is_a_payload_error() {
    assert!(matches!(
        parse_payload("{not json").unwrap_err(),
        SlotError::Payload(_)
    ));
    assert!(matches!(
        parse_payload(r#"{"appointments": [{"name": "missing times"}]}"#).unwrap_err(),
        SlotError::Payload(_)
    ));
}

#[test]
fn mock_payload_becomes_busy_intervals() {
    let busy = busy_intervals(&parse_payload(MOCK_PAYLOAD).unwrap()).unwrap();

    assert_eq!(busy.len(), 4);
    assert_eq!(busy[0].from, Utc.with_ymd_and_hms(2021, 3, 3, 12, 0, 0).unwrap());
    assert_eq!(busy[0].to, Utc.with_ymd_and_hms(2021, 3, 3, 13, 0, 0).unwrap());
    assert_eq!(busy[2].duration_minutes(), 210);
}

#[test]
fn timestamp_formats() {
    let expected = Utc.with_ymd_and_hms(2021, 3, 3, 12, 0, 0).unwrap();

    for s in [
        "2021-03-03T12:00:00Z",
        "2021-03-03T12:00:00+00:00",
        "2021-03-03T12:00:00+0000",
        "2021-03-03T13:00:00+0100",
        "2021-03-03T07:00:00-05:00",
        "2021-03-03T12:00:00",
        "2021-03-03T12:00",
        " 2021-03-03T12:00:00Z ",
    ] {
        assert_eq!(parse_timestamp(s).unwrap(), expected, "parsing '{}'", s);
    }
}

#[test]
fn malformed_timestamp_is_reported() {
    for bad in ["", "yesterday", "2021-03-03", "2021-13-03T12:00:00Z", "12:00"] {
        assert!(
            matches!(parse_timestamp(bad).unwrap_err(), SlotError::MalformedTimestamp(_)),
            "'{}' should be malformed",
            bad
        );
    }
}

#[test]
fn end_before_start_is_rejected() {
    let err = busy_intervals(&[appointment("2021-03-03T10:00:00Z", "2021-03-03T09:00:00Z")])
        .unwrap_err();
    assert!(matches!(err, SlotError::InvalidBusyInterval { .. }));
}

#[test]
fn first_bad_record_fails_the_batch() {
    let err = busy_intervals(&[
        appointment("2021-03-03T09:00:00Z", "2021-03-03T10:00:00Z"),
        appointment("2021-03-03T09:00:00Z", "soon"),
    ])
    .unwrap_err();
    assert!(matches!(err, SlotError::MalformedTimestamp(ref s) if s == "soon"));
}
