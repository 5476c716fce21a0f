// crates/canopen-od/src/flat/timestamp.rs
//! EDS keeps dates as `MM-dd-yyyy` and times as `h:mmAM`; the flat tree
//! keeps one timestamp.

use crate::diagnostics::{Diagnostics, WarningKind};
use alloc::format;
use alloc::string::{String, ToString};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMAT: &str = "%m-%d-%Y";
const TIME_PARSE_FORMAT: &str = "%I:%M%p";
const TIME_WRITE_FORMAT: &str = "%-I:%M%p";

/// Joins an EDS date and time. Both empty gives `None`; anything that does
/// not parse gives the epoch and a warning. A missing time means midnight.
pub fn combine_date_time(date: &str, time: &str, diag: &mut Diagnostics) -> Option<NaiveDateTime> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() && time.is_empty() {
        return None;
    }

    let parsed_date = NaiveDate::parse_from_str(date, DATE_FORMAT);
    let parsed_time = if time.is_empty() {
        Ok(NaiveTime::default())
    } else {
        NaiveTime::parse_from_str(&time.to_uppercase(), TIME_PARSE_FORMAT)
    };

    match (parsed_date, parsed_time) {
        (Ok(d), Ok(t)) => Some(d.and_time(t)),
        _ => {
            diag.push(
                WarningKind::MalformedTimestamp,
                format!("Cannot read date '{}' time '{}', using epoch", date, time),
            );
            Some(NaiveDateTime::default())
        }
    }
}

/// Splits a timestamp into the EDS date and time strings.
pub fn split_date_time(timestamp: Option<NaiveDateTime>) -> (String, String) {
    match timestamp {
        Some(ts) => (
            ts.format(DATE_FORMAT).to_string(),
            ts.format(TIME_WRITE_FORMAT).to_string(),
        ),
        None => (String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_and_split() {
        let mut diag = Diagnostics::new();
        let ts = combine_date_time("03-14-2021", "9:05PM", &mut diag).unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2021, 3, 14)
                .unwrap()
                .and_hms_opt(21, 5, 0)
                .unwrap()
        );
        assert_eq!(
            split_date_time(Some(ts)),
            ("03-14-2021".to_string(), "9:05PM".to_string())
        );
        assert!(diag.is_empty());
    }

    #[test]
    fn test_lowercase_meridiem() {
        let mut diag = Diagnostics::new();
        let ts = combine_date_time("12-01-2020", "11:30am", &mut diag).unwrap();
        assert_eq!(split_date_time(Some(ts)).1, "11:30AM");
    }

    #[test]
    fn test_empty_is_none() {
        let mut diag = Diagnostics::new();
        assert_eq!(combine_date_time("", " ", &mut diag), None);
        assert_eq!(split_date_time(None), (String::new(), String::new()));
        assert!(diag.is_empty());
    }

    #[test]
    fn test_malformed_degrades_to_epoch() {
        let mut diag = Diagnostics::new();
        let ts = combine_date_time("2021/03/14", "9:05PM", &mut diag);
        assert_eq!(ts, Some(NaiveDateTime::default()));
        assert_eq!(diag.count(WarningKind::MalformedTimestamp), 1);
    }
}
