//! Lenient field coercion. Nothing here fails: a value that cannot be
//! read is reported as absent.

use super::RawRow;

/// First listed column that is present with a non-empty value.
pub fn pick<'a>(row: &'a RawRow, columns: &[String]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|c| row.get(c))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

pub fn text(row: &RawRow, columns: &[String]) -> Option<String> {
    pick(row, columns).map(str::to_string)
}

pub fn number(row: &RawRow, columns: &[String]) -> Option<f64> {
    pick(row, columns).and_then(parse_number)
}

pub fn whole(row: &RawRow, columns: &[String]) -> Option<i32> {
    pick(row, columns).and_then(parse_whole)
}

/// Parse a float, tolerating thousands separators and a `%` suffix.
/// Non-finite results (`NaN`, `inf`) count as unparseable.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whole number; `"5.0"` is accepted, `"5.5"` is not.
pub fn parse_whole(raw: &str) -> Option<i32> {
    let value = parse_number(raw)?;
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value as i32)
}

/// Split a combined `"city district"` string on the first whitespace.
///
/// `"수원시 장안구"` → (`수원시`, `장안구`); a value without whitespace is
/// taken as the city alone.
pub fn split_locality(raw: &str) -> (Option<String>, Option<String>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (None, None);
    }
    match raw.split_once(char::is_whitespace) {
        Some((city, district)) => {
            let district = district.trim();
            let district = (!district.is_empty()).then(|| district.to_string());
            (Some(city.to_string()), district)
        }
        None => (Some(raw.to_string()), None),
    }
}
