// Helpers for turning loosely typed JSON values into numbers and numbers
// into display strings.
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

/// Read a JSON value as a finite `f64`.
///
/// - Accepts JSON numbers and numeric strings (`" 12.5 "`).
/// - Returns `Ok(None)` for a missing field or `null`.
/// - Returns `Err(expected)` when the value is present but not a usable number,
///   so the caller can report which field was mistyped.
pub fn parse_f64_value(v: Option<&Value>) -> Result<Option<f64>, &'static str> {
    const EXPECTED: &str = "a number";
    let n = match v {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64().ok_or(EXPECTED)?,
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>().map_err(|_| EXPECTED)?
        }
        Some(_) => return Err(EXPECTED),
    };
    if n.is_finite() {
        Ok(Some(n))
    } else {
        Err(EXPECTED)
    }
}

/// Like [`parse_f64_value`] but requires an integral value. `7.0` is
/// accepted as `7`, `7.5` is not.
pub fn parse_i64_value(v: Option<&Value>) -> Result<Option<i64>, &'static str> {
    const EXPECTED: &str = "an integer";
    if let Some(Value::Number(n)) = v {
        if let Some(i) = n.as_i64() {
            return Ok(Some(i));
        }
    }
    match parse_f64_value(v).map_err(|_| EXPECTED)? {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
        Some(_) => Err(EXPECTED),
        None => Ok(None),
    }
}

/// Read a JSON value as text, exactly as delivered.
///
/// Identifiers are grouping keys, so no trimming happens here: `"A"` and
/// `"A "` are different projects, and `""` is a project like any other.
/// Only a missing field or `null` counts as absent.
pub fn parse_string_value(v: Option<&Value>) -> Result<Option<String>, &'static str> {
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        // Numeric agent or project codes are kept as their text form.
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err("a string"),
    }
}

/// Format a ratio as a percentage with two decimals: `0.1811` -> `18.11%`.
///
/// Rounding is Rust's fixed-point formatting of the scaled binary value, so
/// boundary inputs like `0.18115` land wherever their `f64` representation
/// falls.
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Optional cell value; absent fields render as an empty string.
pub fn format_cell<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators on the integer part
    // (e.g. `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_val: i64 = parts.next().unwrap_or("0").parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = parts.next() {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
