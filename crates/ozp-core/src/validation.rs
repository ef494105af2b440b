//! Field-keyed validation errors.
//!
//! Request payloads are validated field by field. Every failure is recorded
//! under the name of the offending field; the collected map is returned to
//! the client as the body of a `400 Bad Request`.
//!
//! ```text
//! {"is_new_user": ["\"4\" is not a valid boolean."]}
//! {"stewarded_organizations": {"non_field_errors": ["Expected a list of items but got type \"bool\"."]}}
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidationErrors;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Map<String, Value>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the list of messages for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let entry = self
            .0
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        match entry {
            Value::Array(messages) => messages.push(Value::String(message.into())),
            other => *other = Value::Array(vec![Value::String(message.into())]),
        }
    }

    /// Records a structured error (nested map or per-item list) for `field`.
    pub fn insert(&mut self, field: &str, errors: Value) {
        self.0.insert(field.to_string(), errors);
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Wraps a single non-field message, e.g. for nested list/dict errors.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_non_field(message);
        errors
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, errors) in other.0 {
            self.0.insert(field, errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.add(&field, message);
            }
        }
        fields
    }
}
