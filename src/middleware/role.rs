//! Role-based authorization for Axum.
//!
//! Roles form a total order (`USER < ORG_STEWARD < APPS_MALL_STEWARD`), so
//! every check is a minimum-tier comparison against the caller's highest
//! role:
//! 1. Extractor-based approach using [`RequireAppsMallSteward`]
//! 2. Helper functions for checks inside handler or service logic

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use ozp_core::AppError;
use ozp_models::Role;

use crate::metrics::track_authorization_denied;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fails with 403 unless `user_role` is at least `minimum_required_role`.
pub fn check_role_hierarchy(user_role: Role, minimum_required_role: Role) -> Result<(), AppError> {
    if !user_role.at_least(minimum_required_role) {
        return Err(AppError::forbidden());
    }
    Ok(())
}

/// Checks the authenticated caller against a minimum role, recording denials.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_minimum_role(&auth_user, Role::OrgSteward)?;
///     // Handler logic
/// }
/// ```
pub fn check_minimum_role(auth_user: &AuthUser, minimum: Role) -> Result<(), AppError> {
    check_role_hierarchy(auth_user.role(), minimum).inspect_err(|_| {
        warn!(
            username = %auth_user.username(),
            role = %auth_user.role(),
            required = %minimum,
            "Authorization denied"
        );
        track_authorization_denied(auth_user.role().as_str(), minimum.as_str());
    })
}

/// Extractor for APPS_MALL_STEWARD-only endpoints.
///
/// Placed before any body extractor so the role check runs before the
/// payload is read.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn update_handler(
///     RequireAppsMallSteward(auth_user): RequireAppsMallSteward,
///     ValidatedPayload(dto): ValidatedPayload<ProfileUpdate>,
/// ) -> Result<Json<ProfileView>, AppError> { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAppsMallSteward(pub AuthUser);

impl FromRequestParts<AppState> for RequireAppsMallSteward {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_minimum_role(&auth_user, Role::AppsMallSteward)?;
        Ok(RequireAppsMallSteward(auth_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_role_hierarchy() {
        assert!(check_role_hierarchy(Role::AppsMallSteward, Role::AppsMallSteward).is_ok());
        assert!(check_role_hierarchy(Role::AppsMallSteward, Role::User).is_ok());
        assert!(check_role_hierarchy(Role::OrgSteward, Role::User).is_ok());
    }

    #[test]
    fn test_role_hierarchy_denied_is_forbidden() {
        let err = check_role_hierarchy(Role::OrgSteward, Role::AppsMallSteward).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert!(check_role_hierarchy(Role::User, Role::OrgSteward).is_err());
    }
}
