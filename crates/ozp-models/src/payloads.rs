//! Update payload parsing.
//!
//! Update bodies arrive as JSON objects whose fields may carry the wrong
//! type. Instead of failing the whole body on the first mismatch, each
//! recognized field is checked on its own and failures are collected in a
//! [`FieldErrors`] map keyed by field name. Unrecognized fields (including
//! read-only ones such as `id` or `organizations`) are ignored.

use serde::Serialize;
use serde_json::{Map, Value, json};
use utoipa::ToSchema;
use validator::Validate;

use ozp_core::FieldErrors;
use ozp_core::json::{display_input, lenient_bool, type_name};

use crate::organizations::OrganizationRef;
use crate::profiles::ProfileChanges;

const NULL_NOT_ALLOWED: &str = "This field may not be null.";
const BLANK_NOT_ALLOWED: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";

/// Builds a DTO from a JSON object body.
pub trait FromPayload: Sized {
    fn from_payload(payload: &Map<String, Value>) -> Result<Self, FieldErrors>;
}

/// Body of `PUT /api/self/profile/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate, ToSchema)]
pub struct SelfProfileUpdate {
    pub is_new_user: Option<bool>,
    /// Only applied when the caller is an APPS_MALL_STEWARD.
    pub stewarded_organizations: Option<Vec<OrganizationRef>>,
}

impl FromPayload for SelfProfileUpdate {
    fn from_payload(payload: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut update = SelfProfileUpdate::default();

        if let Some(value) = payload.get("is_new_user") {
            match parse_boolean(value) {
                Ok(flag) => update.is_new_user = Some(flag),
                Err(message) => errors.add("is_new_user", message),
            }
        }

        if let Some(value) = payload.get("stewarded_organizations") {
            match parse_organization_refs(value) {
                Ok(refs) => update.stewarded_organizations = Some(refs),
                Err(detail) => errors.insert("stewarded_organizations", detail),
            }
        }

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }
}

impl SelfProfileUpdate {
    /// Changes to store; stewardship is dropped unless `may_steward`.
    pub fn into_changes(self, may_steward: bool) -> ProfileChanges {
        ProfileChanges {
            display_name: None,
            is_new_user: self.is_new_user,
            stewarded_organizations: self.stewarded_organizations.filter(|_| may_steward),
        }
    }
}

/// Body of `PUT /api/profile/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate, ToSchema)]
pub struct ProfileUpdate {
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub display_name: Option<String>,
    pub stewarded_organizations: Option<Vec<OrganizationRef>>,
}

impl FromPayload for ProfileUpdate {
    fn from_payload(payload: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut update = ProfileUpdate::default();

        if let Some(value) = payload.get("display_name") {
            match parse_string(value) {
                Ok(name) if name.is_empty() => errors.add("display_name", BLANK_NOT_ALLOWED),
                Ok(name) => update.display_name = Some(name),
                Err(message) => errors.add("display_name", message),
            }
        }

        if let Some(value) = payload.get("stewarded_organizations") {
            match parse_organization_refs(value) {
                Ok(refs) => update.stewarded_organizations = Some(refs),
                Err(detail) => errors.insert("stewarded_organizations", detail),
            }
        }

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }
}

impl From<ProfileUpdate> for ProfileChanges {
    fn from(update: ProfileUpdate) -> Self {
        ProfileChanges {
            display_name: update.display_name,
            is_new_user: None,
            stewarded_organizations: update.stewarded_organizations,
        }
    }
}

fn parse_boolean(value: &Value) -> Result<bool, String> {
    if value.is_null() {
        return Err(NULL_NOT_ALLOWED.to_string());
    }
    lenient_bool(value)
        .ok_or_else(|| format!("\"{}\" is not a valid boolean.", display_input(value)))
}

/// Strings are trimmed; numbers are accepted in their textual form.
fn parse_string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(NULL_NOT_ALLOWED.to_string()),
        _ => Err(NOT_A_STRING.to_string()),
    }
}

/// Parses a list of organization references.
///
/// On failure returns the error detail for the field: a nested
/// `non_field_errors` object when the value is not a list, or a list aligned
/// with the payload items when individual items are invalid.
fn parse_organization_refs(value: &Value) -> Result<Vec<OrganizationRef>, Value> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Err(json!([NULL_NOT_ALLOWED])),
        other => {
            return Err(FieldErrors::non_field(format!(
                "Expected a list of items but got type \"{}\".",
                type_name(other)
            ))
            .into_value());
        }
    };

    let mut refs = Vec::with_capacity(items.len());
    let mut item_errors = Vec::with_capacity(items.len());
    let mut failed = false;

    for item in items {
        match parse_organization_ref(item) {
            Ok(org_ref) => {
                refs.push(org_ref);
                item_errors.push(json!({}));
            }
            Err(errors) => {
                failed = true;
                item_errors.push(errors.into_value());
            }
        }
    }

    if failed {
        Err(Value::Array(item_errors))
    } else {
        Ok(refs)
    }
}

fn parse_organization_ref(item: &Value) -> Result<OrganizationRef, FieldErrors> {
    let Value::Object(fields) = item else {
        return Err(FieldErrors::non_field(format!(
            "Invalid data. Expected a dictionary, but got {}.",
            type_name(item)
        )));
    };

    let mut errors = FieldErrors::new();
    let mut org_ref = OrganizationRef {
        title: None,
        short_name: None,
    };

    for (name, slot) in [
        ("title", &mut org_ref.title),
        ("short_name", &mut org_ref.short_name),
    ] {
        if let Some(value) = fields.get(name) {
            match parse_string(value) {
                Ok(text) => *slot = Some(text),
                Err(message) => errors.add(name, message),
            }
        }
    }

    if errors.is_empty() && org_ref.title.is_none() && org_ref.short_name.is_none() {
        errors.add_non_field("Either title or short_name is required.");
    }

    if errors.is_empty()
        && let Err(validation) = org_ref.validate()
    {
        errors.merge(FieldErrors::from(&validation));
    }

    if errors.is_empty() {
        Ok(org_ref)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_self_update_parses_flag_and_ignores_read_only_fields() {
        let update = SelfProfileUpdate::from_payload(&object(json!({
            "id": 5,
            "display_name": "Someone Else",
            "organizations": [],
            "is_new_user": false
        })))
        .unwrap();
        assert_eq!(update.is_new_user, Some(false));
        assert_eq!(update.stewarded_organizations, None);
    }

    #[test]
    fn test_self_update_accepts_boolean_like_strings() {
        let update =
            SelfProfileUpdate::from_payload(&object(json!({"is_new_user": "false"}))).unwrap();
        assert_eq!(update.is_new_user, Some(false));
    }

    #[test]
    fn test_self_update_rejects_numeric_flag() {
        let errors =
            SelfProfileUpdate::from_payload(&object(json!({"id": 5, "is_new_user": 4})))
                .unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({"is_new_user": ["\"4\" is not a valid boolean."]})
        );
    }

    #[test]
    fn test_self_update_rejects_null_flag() {
        let errors =
            SelfProfileUpdate::from_payload(&object(json!({"is_new_user": null}))).unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({"is_new_user": ["This field may not be null."]})
        );
    }

    #[test]
    fn test_non_list_stewarded_organizations() {
        let errors = ProfileUpdate::from_payload(&object(json!({
            "display_name": "Winston Smith",
            "stewarded_organizations": false
        })))
        .unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({
                "stewarded_organizations": {
                    "non_field_errors": ["Expected a list of items but got type \"bool\"."]
                }
            })
        );
    }

    #[test]
    fn test_null_stewarded_organizations() {
        let errors = ProfileUpdate::from_payload(&object(json!({
            "stewarded_organizations": null
        })))
        .unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({"stewarded_organizations": ["This field may not be null."]})
        );

        let errors = SelfProfileUpdate::from_payload(&object(json!({
            "is_new_user": false,
            "stewarded_organizations": null
        })))
        .unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({"stewarded_organizations": ["This field may not be null."]})
        );
    }

    #[test]
    fn test_item_errors_are_aligned_with_items() {
        let errors = ProfileUpdate::from_payload(&object(json!({
            "stewarded_organizations": [
                {"title": "Ministry of Truth"},
                "Ministry of Love",
                {}
            ]
        })))
        .unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({
                "stewarded_organizations": [
                    {},
                    {"non_field_errors": ["Invalid data. Expected a dictionary, but got str."]},
                    {"non_field_errors": ["Either title or short_name is required."]}
                ]
            })
        );
    }

    #[test]
    fn test_organization_refs_parse() {
        let update = ProfileUpdate::from_payload(&object(json!({
            "display_name": "Winston Smith",
            "stewarded_organizations": [
                {"title": "Ministry of Truth"},
                {"short_name": "Miniluv"}
            ]
        })))
        .unwrap();
        let refs = update.stewarded_organizations.unwrap();
        assert_eq!(refs[0], OrganizationRef::by_title("Ministry of Truth"));
        assert_eq!(refs[1].short_name.as_deref(), Some("Miniluv"));
        assert_eq!(update.display_name.as_deref(), Some("Winston Smith"));
    }

    #[test]
    fn test_display_name_type_and_length() {
        let errors =
            ProfileUpdate::from_payload(&object(json!({"display_name": ["x"]}))).unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({"display_name": ["Not a valid string."]})
        );

        let errors =
            ProfileUpdate::from_payload(&object(json!({"display_name": "   "}))).unwrap_err();
        assert_eq!(
            errors.into_value(),
            json!({"display_name": ["This field may not be blank."]})
        );

        let long = ProfileUpdate::from_payload(&object(json!({"display_name": "x".repeat(256)})))
            .unwrap();
        let validation = long.validate().unwrap_err();
        assert_eq!(
            FieldErrors::from(&validation).into_value(),
            json!({"display_name": ["Ensure this field has no more than 255 characters."]})
        );
    }

    #[test]
    fn test_self_update_drops_stewardship_for_non_stewards() {
        let update = SelfProfileUpdate {
            is_new_user: Some(false),
            stewarded_organizations: Some(vec![OrganizationRef::by_title("Ministry of Love")]),
        };
        let changes = update.clone().into_changes(false);
        assert_eq!(changes.stewarded_organizations, None);
        assert_eq!(changes.is_new_user, Some(false));

        let changes = update.into_changes(true);
        assert_eq!(changes.stewarded_organizations.map(|r| r.len()), Some(1));
    }
}
