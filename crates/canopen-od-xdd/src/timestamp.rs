// crates/canopen-od-xdd/src/timestamp.rs

//! File dates: EDS style `MM-dd-yyyy` / `h:mmAM` in the model, xsd:date /
//! xsd:time on the ProfileBody.

use alloc::format;
use alloc::string::{String, ToString};
use canopen_od::flat::{combine_date_time, split_date_time};
use canopen_od::{Diagnostics, WarningKind};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const XSD_DATE: &str = "%Y-%m-%d";
const XSD_TIME: &str = "%H:%M:%S";

/// Model date and time to `(fileXxxDate, fileXxxTime)`. Both empty gives
/// no attributes.
pub fn to_xsd(date: &str, time: &str, diag: &mut Diagnostics) -> (Option<String>, Option<String>) {
    match combine_date_time(date, time, diag) {
        Some(ts) => (
            Some(ts.format(XSD_DATE).to_string()),
            Some(ts.format(XSD_TIME).to_string()),
        ),
        None => (None, None),
    }
}

/// ProfileBody date and time back to the model strings. A zone suffix or
/// fraction is ignored; a value that does not parse gives the epoch and a
/// warning.
pub fn from_xsd(date: Option<&str>, time: Option<&str>, diag: &mut Diagnostics) -> (String, String) {
    let date = date.map(str::trim).unwrap_or_default();
    let time = time.map(str::trim).unwrap_or_default();
    if date.is_empty() && time.is_empty() {
        return (String::new(), String::new());
    }

    let parsed_date = NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), XSD_DATE);
    let parsed_time = if time.is_empty() {
        Ok(NaiveTime::default())
    } else {
        NaiveTime::parse_from_str(time.get(..8).unwrap_or(time), XSD_TIME)
    };

    let ts = match (parsed_date, parsed_time) {
        (Ok(d), Ok(t)) => d.and_time(t),
        _ => {
            diag.push(
                WarningKind::MalformedTimestamp,
                format!("Cannot read file date '{}' time '{}', using epoch", date, time),
            );
            NaiveDateTime::default()
        }
    };
    split_date_time(Some(ts))
}
