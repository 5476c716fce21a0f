// crates/canopen-od-xdd/src/properties.rs

//! `CO_*` `<property>` elements carrying the CANopenNode extensions of an
//! entry. Only values that differ from the default are written.

use crate::model::app_process::{Parameter, Property};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use canopen_od::od::{AccessSrdo, CustomProperties, DEFAULT_STORAGE_GROUP};
use canopen_od::{Diagnostics, WarningKind};

pub const CO_DISABLED: &str = "CO_disabled";
pub const CO_COUNT_LABEL: &str = "CO_countLabel";
pub const CO_STORAGE_GROUP: &str = "CO_storageGroup";
pub const CO_FLAGS_PDO: &str = "CO_flagsPDO";
pub const CO_ACCESS_SRDO: &str = "CO_accessSRDO";
pub const CO_STRING_LENGTH_MIN: &str = "CO_stringLengthMin";

pub fn to_properties(custom: &CustomProperties) -> Vec<Property> {
    let mut out = Vec::new();
    let mut push = |name: &str, value: String| {
        out.push(Property {
            name: name.into(),
            value,
        })
    };

    if custom.disabled {
        push(CO_DISABLED, "true".into());
    }
    if !custom.count_label.is_empty() {
        push(CO_COUNT_LABEL, custom.count_label.clone());
    }
    if custom.storage_group != DEFAULT_STORAGE_GROUP {
        push(CO_STORAGE_GROUP, custom.storage_group.clone());
    }
    if custom.flags_pdo {
        push(CO_FLAGS_PDO, "true".into());
    }
    if custom.access_srdo != AccessSrdo::No {
        push(CO_ACCESS_SRDO, custom.access_srdo.token().into());
    }
    if custom.string_length_min != 0 {
        push(CO_STRING_LENGTH_MIN, custom.string_length_min.to_string());
    }
    out
}

/// Reads the `CO_*` properties of a parameter. Absent properties keep their
/// defaults; unknown property names are ignored.
pub fn from_properties(param: &Parameter, owner: &str, diag: &mut Diagnostics) -> CustomProperties {
    let mut custom = CustomProperties::default();
    let get = |name: &str| param.property(name).map(str::trim);

    if let Some(value) = get(CO_DISABLED) {
        custom.disabled = parse_bool(value, owner, CO_DISABLED, diag);
    }
    if let Some(value) = get(CO_COUNT_LABEL) {
        custom.count_label = value.into();
    }
    if let Some(value) = get(CO_STORAGE_GROUP).filter(|v| !v.is_empty()) {
        custom.storage_group = value.into();
    }
    if let Some(value) = get(CO_FLAGS_PDO) {
        custom.flags_pdo = parse_bool(value, owner, CO_FLAGS_PDO, diag);
    }
    if let Some(value) = get(CO_ACCESS_SRDO) {
        match AccessSrdo::from_token(value) {
            Some(srdo) => custom.access_srdo = srdo,
            None => diag.push(
                WarningKind::EnumOutOfRange,
                format!("{}: {}='{}' is not an SRDO access", owner, CO_ACCESS_SRDO, value),
            ),
        }
    }
    if let Some(value) = get(CO_STRING_LENGTH_MIN) {
        match value.parse::<u32>() {
            Ok(n) => custom.string_length_min = n,
            Err(_) => diag.push(
                WarningKind::ValueConversion,
                format!("{}: {}='{}' is not a length", owner, CO_STRING_LENGTH_MIN, value),
            ),
        }
    }
    custom
}

fn parse_bool(value: &str, owner: &str, name: &str, diag: &mut Diagnostics) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => true,
        "false" | "0" | "" => false,
        _ => {
            diag.push(
                WarningKind::ValueConversion,
                format!("{}: {}='{}' is not a boolean", owner, name, value),
            );
            false
        }
    }
}
