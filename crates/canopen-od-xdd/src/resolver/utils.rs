// crates/canopen-od-xdd/src/resolver/utils.rs

//! Utility functions for the resolver.

use crate::error::XddError;
use alloc::format;
use canopen_od::od::value::parse_unsigned;
use canopen_od::{Diagnostics, WarningKind};

/// Strips an optional `0x`/`0X` prefix.
fn strip_hex(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Parses a hex `@index` ("1018" or "0x1018").
pub(super) fn parse_index(text: &str) -> Result<u16, XddError> {
    Ok(u16::from_str_radix(strip_hex(text), 16)?)
}

/// Parses a hex `@subIndex` ("01" or "0x01").
pub(super) fn parse_sub_index(text: &str) -> Result<u8, XddError> {
    Ok(u8::from_str_radix(strip_hex(text), 16)?)
}

/// Parses a hex attribute such as `@dataType` or `@objFlags`.
pub(super) fn parse_hex_u32(text: &str) -> Option<u32> {
    u32::from_str_radix(strip_hex(text), 16).ok()
}

/// Parses an identity number ("0x000001A5" or decimal). Anything else is
/// reported and read as 0.
pub(super) fn parse_u32(text: &str, what: &str, diag: &mut Diagnostics) -> u32 {
    match parse_unsigned(text, 0).and_then(|v| u32::try_from(v).ok()) {
        Some(v) => v,
        None => {
            diag.push(
                WarningKind::ValueConversion,
                format!("{} '{}' is not a 32-bit number", what, text),
            );
            0
        }
    }
}

/// Reads the kbit/s value from "250 Kbps".
pub(super) fn parse_baud_rate(text: &str) -> Option<u16> {
    let digits: &str = text
        .trim()
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    digits.parse().ok()
}
