// crates/canopen-od/src/od/value.rs
//! Helpers for the lexical values kept on OD entries. Values stay strings in
//! the model; these functions give them a number when one is needed.

use alloc::string::String;

/// Parses an EDS style integer: `0x` hex, leading-zero octal or decimal,
/// optionally negative. A `$NODEID` term is replaced by `node_id`, so
/// `$NODEID+0x180` evaluates to `0x180 + node_id`.
pub fn parse_number(text: &str, node_id: u8) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let upper = text.to_ascii_uppercase();
    if let Some(pos) = upper.find("$NODEID") {
        let rest = remove_node_id_term(&upper, pos);
        let base = if rest.is_empty() { 0 } else { parse_plain(&rest)? };
        return base.checked_add(i64::from(node_id));
    }
    parse_plain(text)
}

/// Strips `$NODEID` and the `+` joining it to the rest of the expression.
fn remove_node_id_term(upper: &str, pos: usize) -> String {
    let before = upper[..pos].trim().trim_end_matches('+').trim();
    let after = upper[pos + "$NODEID".len()..].trim().trim_start_matches('+').trim();
    let mut rest = String::from(before);
    rest.push_str(after);
    rest
}

fn parse_plain(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, text.trim_start_matches('+')),
    };

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };

    let value = i64::try_from(value).ok().or_else(|| {
        // Full-width unsigned 64-bit patterns keep their bits.
        if negative { None } else { Some(value as i64) }
    })?;
    Some(if negative { -value } else { value })
}

/// Parses a number as `u64`, the way limits and defaults of unsigned types
/// are read. Negative values are rejected.
pub fn parse_unsigned(text: &str, node_id: u8) -> Option<u64> {
    let text = text.trim();
    if text.starts_with('-') {
        return None;
    }
    parse_number(text, node_id).map(|v| v as u64)
}

/// Numeric base a value was written in. Used to rewrite a number without
/// changing how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Hex,
    Octal,
    Decimal,
}

impl NumberBase {
    pub fn of(text: &str) -> NumberBase {
        let text = text.trim();
        if text.starts_with("0x") || text.starts_with("0X") {
            NumberBase::Hex
        } else if text.len() > 1 && text.starts_with('0') {
            NumberBase::Octal
        } else {
            NumberBase::Decimal
        }
    }

    pub fn format(self, value: u64) -> String {
        match self {
            NumberBase::Hex => alloc::format!("0x{:02X}", value),
            NumberBase::Octal => alloc::format!("0{:o}", value),
            NumberBase::Decimal => alloc::format!("{}", value),
        }
    }
}

/// Whether the value text is literally a number (no `$NODEID`).
pub fn is_plain_number(text: &str) -> bool {
    parse_plain(text.trim()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bases() {
        assert_eq!(parse_number("0x1A", 0), Some(26));
        assert_eq!(parse_number("0X1a", 0), Some(26));
        assert_eq!(parse_number("017", 0), Some(15));
        assert_eq!(parse_number("42", 0), Some(42));
        assert_eq!(parse_number("0", 0), Some(0));
        assert_eq!(parse_number("-5", 0), Some(-5));
        assert_eq!(parse_number(" 7 ", 0), Some(7));
        assert_eq!(parse_number("abc", 0), None);
        assert_eq!(parse_number("", 0), None);
        assert_eq!(parse_number("09", 0), None);
    }

    #[test]
    fn test_parse_node_id() {
        assert_eq!(parse_number("$NODEID+0x180", 5), Some(0x185));
        assert_eq!(parse_number("0x200+$NODEID", 1), Some(0x201));
        assert_eq!(parse_number("$nodeid", 3), Some(3));
    }

    #[test]
    fn test_number_base_round_trip() {
        assert_eq!(NumberBase::of("0x01"), NumberBase::Hex);
        assert_eq!(NumberBase::Hex.format(3), "0x03");
        assert_eq!(NumberBase::of("2"), NumberBase::Decimal);
        assert_eq!(NumberBase::Decimal.format(3), "3");
        assert_eq!(NumberBase::of("010"), NumberBase::Octal);
        assert_eq!(NumberBase::Octal.format(8), "010");
    }

    #[test]
    fn test_unsigned_64_bit_pattern() {
        assert_eq!(
            parse_unsigned("0xFFFFFFFFFFFFFFFF", 0),
            Some(u64::MAX)
        );
        assert_eq!(parse_unsigned("-1", 0), None);
    }
}
