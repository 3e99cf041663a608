//! Missing-value normalization for DSSAT data.
//!
//! DSSAT marks "value not supplied" with the literal `-99`. Parsed sources
//! may additionally carry `nan`/`NaN` tokens or plain empty fields. These
//! helpers fold all of those into one representation: `""` for display
//! strings, `None` for numbers. A real zero is never collapsed into the
//! sentinel, and the sentinel is never read back as a measurement.

/// DSSAT's numeric sentinel for "value not measured / not applicable".
pub const MISSING_VALUE: f64 = -99.0;

/// The sentinel as it appears in file text.
pub const MISSING_TOKEN: &str = "-99";

/// Returns true when a parsed number is the `-99` sentinel.
pub fn is_missing_number(value: f64) -> bool {
    value == MISSING_VALUE
}

/// Parses trimmed text as a number, returning `None` instead of an error for
/// anything unparseable.
///
/// This is the uniform replacement for ad-hoc "is this coercible to a float"
/// checks: absent is a value, not a failure. Non-finite results (`inf`,
/// `NaN` spellings accepted by `f64::from_str`) are treated as absent.
pub fn parse_optional_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns true when a token is a plain decimal number: optional leading
/// minus, digits, optional fractional part. Used to pick latitude/longitude
/// out of a free-form site line, where `f64::from_str`'s wider grammar
/// (`1e5`, `inf`) would be too permissive.
pub fn is_numeric_token(token: &str) -> bool {
    let rest = token.strip_prefix('-').unwrap_or(token);
    let (integral, fraction) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match fraction {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

/// Renders a number the way the display layer shows it: shortest form that
/// round-trips, no trailing `.0` on integral values.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Normalizes a raw field into a clean display string.
///
/// Empty text, `nan`/`NaN` tokens, and the `-99` sentinel (in string or any
/// numeric spelling) all become `""`. Numeric tokens are re-rendered through
/// [`format_number`], so `61.0` reads as `"61"` and `0.60` as `"0.6"`.
/// Anything else is returned trimmed.
pub fn sane(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "nan" || trimmed == "NaN" {
        return String::new();
    }
    if let Some(number) = parse_optional_number(trimmed) {
        if is_missing_number(number) {
            return String::new();
        }
        return format_number(number);
    }
    trimmed.to_string()
}
