//! Loose value conversions used by the validation checks.
//!
//! Clients send whatever JSON they like; the checks look at values the same
//! way a loosely typed form validator would: every standard check works on the
//! textual rendering of the value, and the numeric comparison uses a lenient
//! number conversion where `""` is zero and garbage is NaN.

use serde_json::Value;

/// Render a (possibly absent) value as text.
///
/// Absent and null become `""`, arrays join their elements with `,` and
/// objects become `"[object Object]"`.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_to_text(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| to_text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

fn number_to_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // f64 Display never uses exponent notation and drops a zero fraction
    n.as_f64().map(|f| f.to_string()).unwrap_or_default()
}

/// Lenient numeric conversion; NaN when the value has no numeric reading.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => text_to_number(s),
        Some(array @ Value::Array(_)) => text_to_number(&to_text(Some(array))),
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// Parse text as a number: surrounding whitespace is ignored, empty text is
/// zero, `Infinity` and `0x`/`0o`/`0b` literals are understood.
pub fn text_to_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }

    // Rust accepts "inf"/"nan" spellings; plain decimal notation only
    if !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `^[+-]?([0-9]*[.])?[0-9]+$`
pub fn is_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => ("", unsigned),
    };
    !frac_part.is_empty()
        && frac_part.chars().all(|c| c.is_ascii_digit())
        && int_part.chars().all(|c| c.is_ascii_digit())
}

/// `^[-+]?[0-9]+$` (leading zeroes allowed)
pub fn is_int(text: &str) -> bool {
    let digits = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Strict boolean spellings: `true`, `false`, `1`, `0`.
pub fn is_boolean(text: &str) -> bool {
    to_bool(text).is_some()
}

pub fn to_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
