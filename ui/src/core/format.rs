//! Formatting helpers for presenting values the way a browser would.

use serde_json::{Number, Value};

/// Render a JSON number using JavaScript's `String(n)` conventions for the
/// common cases: integral floats lose their trailing `.0`.
pub fn js_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(format_plain).unwrap_or_else(|| n.to_string())
}

/// Plain float rendering without trailing `.0` on integral values.
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{value}")
}

/// Template-literal rendering of a metadata scalar.
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => js_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Fixed-point formatting with thousands separators, i.e. a `,.{precision}f`
/// number format.
pub fn format_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format_plain(value);
    }

    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        out.push('−');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Digits after the decimal point needed to show multiples of `step` exactly.
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    let exponent = step.log10().floor() as i32;
    (-exponent).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn grouped_inserts_separators() {
        assert_eq!(format_grouped(1250.0, 0), "1,250");
        assert_eq!(format_grouped(163.0, 0), "163");
        assert_eq!(format_grouped(5.0, 1), "5.0");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-2000.0, 0), "−2,000");
    }

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(precision_fixed(0.5), 1);
        assert_eq!(precision_fixed(0.05), 2);
        assert_eq!(precision_fixed(2.0), 0);
        assert_eq!(precision_fixed(50.0), 0);
    }

    #[test]
    fn scalars_render_like_template_literals() {
        assert_eq!(display_scalar(&json!(null)), "null");
        assert_eq!(display_scalar(&json!(2.0)), "2");
        assert_eq!(display_scalar(&json!(1.5)), "1.5");
        assert_eq!(display_scalar(&json!("Beaufort/NC")), "Beaufort/NC");
    }
}
