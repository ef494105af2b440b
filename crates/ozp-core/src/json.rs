//! Helpers for loosely-typed JSON request bodies.
//!
//! Update payloads are read as raw [`serde_json::Value`]s so that type
//! mismatches can be reported per field instead of failing the whole body.

use serde_json::Value;

const TRUE_VALUES: &[&str] = &[
    "t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1",
];
const FALSE_VALUES: &[&str] = &[
    "f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0",
];

/// Interprets `value` as a boolean using the lenient rules accepted by the API.
///
/// Returns `None` when the value is not boolean-like (including `null`).
pub fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) if TRUE_VALUES.contains(&s.as_str()) => Some(true),
        Value::String(s) if FALSE_VALUES.contains(&s.as_str()) => Some(false),
        _ => None,
    }
}

/// Type name reported to clients in "expected X but got Y" messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Renders the offending input for error messages; strings are shown unquoted.
pub fn display_input(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_bool_accepts_booleans_and_words() {
        assert_eq!(lenient_bool(&json!(true)), Some(true));
        assert_eq!(lenient_bool(&json!(false)), Some(false));
        assert_eq!(lenient_bool(&json!("yes")), Some(true));
        assert_eq!(lenient_bool(&json!("OFF")), Some(false));
        assert_eq!(lenient_bool(&json!(1)), Some(true));
        assert_eq!(lenient_bool(&json!(0)), Some(false));
    }

    #[test]
    fn test_lenient_bool_rejects_other_values() {
        assert_eq!(lenient_bool(&json!(4)), None);
        assert_eq!(lenient_bool(&json!("maybe")), None);
        assert_eq!(lenient_bool(&json!("tRuE")), None);
        assert_eq!(lenient_bool(&Value::Null), None);
        assert_eq!(lenient_bool(&json!([true])), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(false)), "bool");
        assert_eq!(type_name(&json!(3)), "int");
        assert_eq!(type_name(&json!(3.5)), "float");
        assert_eq!(type_name(&json!("x")), "str");
        assert_eq!(type_name(&json!({})), "dict");
        assert_eq!(type_name(&json!([])), "list");
        assert_eq!(type_name(&Value::Null), "NoneType");
    }

    #[test]
    fn test_display_input() {
        assert_eq!(display_input(&json!(4)), "4");
        assert_eq!(display_input(&json!("maybe")), "maybe");
    }
}
