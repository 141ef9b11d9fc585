//! Per-field type checks for record input
//!
//! Request bodies and stored records are decoded field by field from raw
//! JSON values. A value of the wrong JSON type is recorded as a field error
//! instead of aborting the whole decode, so it is reported together with
//! every other bad field.

use super::errors::ValidationErrors;
use serde_json::Value;

/// Accepts a JSON string
pub fn text(errors: &mut ValidationErrors, field: &str, value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => {
            errors.push(field, "must be a string");
            None
        }
    }
}

/// Accepts a JSON integer, or a float with no fractional part
pub fn integer(errors: &mut ValidationErrors, field: &str, value: Value) -> Option<i64> {
    let whole = match &value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    if whole.is_none() {
        errors.push(field, "must be an integer");
    }
    whole
}

/// Accepts any JSON number
pub fn number(errors: &mut ValidationErrors, field: &str, value: Value) -> Option<f64> {
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    if number.is_none() {
        errors.push(field, "must be a number");
    }
    number
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(28) => Some(28) ; "integer")]
    #[test_case(json!(28.0) => Some(28) ; "whole float")]
    #[test_case(json!(28.5) => None ; "fractional float")]
    #[test_case(json!("thirty") => None ; "string")]
    #[test_case(json!(true) => None ; "boolean")]
    fn test_integer(value: Value) -> Option<i64> {
        let mut errors = ValidationErrors::new();
        let result = integer(&mut errors, "age", value);
        assert_eq!(errors.has_field("age"), result.is_none());
        result
    }

    #[test]
    fn test_number_and_text_reject_other_types() {
        let mut errors = ValidationErrors::new();
        assert_eq!(number(&mut errors, "height", json!(1.7)), Some(1.7));
        assert_eq!(number(&mut errors, "weight", json!("70")), None);
        assert_eq!(text(&mut errors, "name", json!("Asha")), Some("Asha".to_string()));
        assert_eq!(text(&mut errors, "city", json!(42)), None);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors()[0].message, "must be a number");
        assert_eq!(errors.errors()[1].message, "must be a string");
    }
}
