//! Lenient JSON field coercion.
//!
//! The backend's response shapes drifted over time (numbers as strings,
//! ids as integers, fields simply absent), so every field access is
//! defensive: a value that cannot be read as the expected type becomes that
//! type's zero rather than an error.

use serde_json::Value;

/// Read a value as a string. Numbers are stringified; anything else is `""`.
pub fn string_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Read a value as an `f64`, parsing numeric strings. Defaults to `0.0`.
pub fn f64_of(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Read a value as an `i64`, parsing numeric strings and truncating floats.
/// Defaults to `0`.
pub fn i64_of(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse()
                .or_else(|_| s.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_of_handles_strings_numbers_and_absence() {
        assert_eq!(string_of(Some(&json!("abc"))), "abc");
        assert_eq!(string_of(Some(&json!(17))), "17");
        assert_eq!(string_of(Some(&json!(null))), "");
        assert_eq!(string_of(None), "");
    }

    #[test]
    fn f64_of_parses_numeric_strings() {
        assert_eq!(f64_of(Some(&json!(87.4))), 87.4);
        assert_eq!(f64_of(Some(&json!("32.1"))), 32.1);
        assert_eq!(f64_of(Some(&json!(" 5 "))), 5.0);
        assert_eq!(f64_of(Some(&json!("not a number"))), 0.0);
        assert_eq!(f64_of(Some(&json!([1, 2]))), 0.0);
        assert_eq!(f64_of(None), 0.0);
    }

    #[test]
    fn i64_of_parses_strings_and_truncates_floats() {
        assert_eq!(i64_of(Some(&json!(3))), 3);
        assert_eq!(i64_of(Some(&json!("3"))), 3);
        assert_eq!(i64_of(Some(&json!(3.9))), 3);
        assert_eq!(i64_of(Some(&json!("3.9"))), 3);
        assert_eq!(i64_of(Some(&json!({}))), 0);
        assert_eq!(i64_of(None), 0);
    }
}
