use super::*;

fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("fixture timestamp")
        .with_timezone(&Utc)
}

#[test]
fn bare_date_covers_the_whole_day() {
    assert_eq!(
        parse_bound("2024-05-23", Bound::Start).expect("start"),
        utc("2024-05-23T00:00:00Z")
    );
    assert_eq!(
        parse_bound("2024-05-23", Bound::End).expect("end"),
        utc("2024-05-23T23:59:59.999999999Z")
    );
}

#[test]
fn rfc3339_timestamp_is_taken_verbatim() {
    let parsed = parse_bound("2024-05-23T08:56:21.618Z", Bound::End).expect("timestamp");
    assert_eq!(parsed, utc("2024-05-23T08:56:21.618Z"));
}

#[test]
fn javascript_date_string_uses_the_pickers_local_day() {
    let raw = "Thu May 23 2024 00:00:00 GMT+0300 (Eastern European Summer Time)";
    assert_eq!(
        parse_bound(raw, Bound::Start).expect("start"),
        utc("2024-05-22T21:00:00Z")
    );
    assert_eq!(
        parse_bound(raw, Bound::End).expect("end"),
        utc("2024-05-23T20:59:59.999999999Z")
    );
}

#[test]
fn javascript_date_with_time_of_day_is_exact() {
    let raw = "Thu May 23 2024 14:30:00 GMT+0000 (Coordinated Universal Time)";
    assert_eq!(
        parse_bound(raw, Bound::End).expect("end"),
        utc("2024-05-23T14:30:00Z")
    );
}

#[test]
fn malformed_dates_are_rejected() {
    for raw in ["23/05/2024", "tomorrow", "2024-13-40"] {
        let err = parse_bound(raw, Bound::Start).expect_err("must fail");
        assert_eq!(err, DateParseError(raw.to_string()));
    }
}
