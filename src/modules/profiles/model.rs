use utoipa::IntoParams;

use ozp_core::FieldErrors;
use ozp_models::Role;

/// Query parameters of `GET /api/profile/`.
///
/// A parameter given more than once takes its last value.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileListParams {
    /// Only profiles whose highest role equals this role
    /// (`USER`, `ORG_STEWARD` or `APPS_MALL_STEWARD`).
    pub role: Option<String>,
    /// Case-sensitive username prefix.
    pub username_starts_with: Option<String>,
}

impl ProfileListParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (name, value) in pairs {
            match name.as_str() {
                "role" => params.role = Some(value),
                "username_starts_with" => params.username_starts_with = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// Validated listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileListFilter {
    pub role: Option<Role>,
    pub username_starts_with: Option<String>,
}

impl TryFrom<ProfileListParams> for ProfileListFilter {
    type Error = FieldErrors;

    /// Empty parameters are treated as absent.
    fn try_from(params: ProfileListParams) -> Result<Self, Self::Error> {
        let role = match params.role.filter(|r| !r.is_empty()) {
            Some(role) => Some(role.parse::<Role>().map_err(|e| {
                let mut errors = FieldErrors::new();
                errors.add("role", e.to_string());
                errors
            })?),
            None => None,
        };

        Ok(Self {
            role,
            username_starts_with: params.username_starts_with.filter(|p| !p.is_empty()),
        })
    }
}
