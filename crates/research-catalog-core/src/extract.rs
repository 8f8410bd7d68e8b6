//! Comparable scalar forms of record fields.
//!
//! Years are compared as strings, never numerically: a record matches a
//! selected year only when [`extract_year`] produces exactly that string.

use serde_json::Value;

use crate::models::Record;

/// Separator used when joining investigator names.
pub const INVESTIGATOR_SEPARATOR: &str = "; ";

/// Decimal form of the record's year, or `""` when it is not a finite number.
pub fn extract_year(record: Record<'_>) -> String {
    year_token(record.year())
}

/// Decimal form of a raw year value.
///
/// Numbers and numeric strings (surrounding whitespace ignored) that are
/// finite render as integers when integral (`"2021.0"` → `"2021"`), otherwise
/// in shortest decimal form. Absent, null, blank, boolean and non-numeric
/// values render as `""`.
pub fn year_token(value: Option<&Value>) -> String {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => format_number(n),
        _ => String::new(),
    }
}

/// Integral values without a fractional part, others in shortest form.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        // -0.0 prints as "0"
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Join investigator names with `"; "`, preserving order.
///
/// Returns `""` when the list is absent (the field was missing or was not
/// an array in the dataset).
pub fn join_investigators(list: Option<&[String]>) -> String {
    match list {
        Some(names) => names.join(INVESTIGATOR_SEPARATOR),
        None => String::new(),
    }
}
