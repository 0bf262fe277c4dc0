//! Scalar conversions shared by the top-level and block accessors.

/// Parse a boolean literal: yes/true/1 or no/false/0, ignoring case.
pub fn parse_bool(value: &str) -> Option<bool> {
    if ["yes", "true", "1"].iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if ["no", "false", "0"].iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

/// Parse an integer literal with automatic base detection.
///
/// Accepts leading whitespace, an optional sign, `0x`/`0X` for hex and a
/// leading `0` for octal. The whole input must be consumed.
pub fn parse_integer(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (16, hex)
    } else if s.len() > 1 && s.starts_with('0') {
        (8, &s[1..])
    } else {
        (10, s)
    };

    // from_str_radix would accept another sign here
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Integer in `0..=u32::MAX`.
pub fn parse_unsigned(value: &str) -> Option<u32> {
    parse_integer(value).and_then(|v| u32::try_from(v).ok())
}
