use anyhow::Context;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{Span, debug};

use ozp_auth::verify_token;
use ozp_core::AppError;
use ozp_db::ProfileRepository;
use ozp_models::{Profile, ProfileId, Role};

use crate::metrics::track_token_validation;
use crate::state::AppState;

pub const USER_NOT_FOUND: &str = "User not found.";

/// Extractor that validates the bearer token and loads the caller's profile.
///
/// The role is read from the stored groups on every request, never from the
/// token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Profile);

impl AuthUser {
    pub fn profile(&self) -> &Profile {
        &self.0
    }

    pub fn into_profile(self) -> Profile {
        self.0
    }

    pub fn profile_id(&self) -> ProfileId {
        self.0.id
    }

    pub fn username(&self) -> &str {
        self.0.username()
    }

    pub fn role(&self) -> Role {
        self.0.highest_role()
    }
}

/// Returns the token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(AppError::not_authenticated)?;

        let claims = verify_token(token, &state.jwt_config).inspect_err(|_| {
            track_token_validation(false);
        })?;
        track_token_validation(true);

        let profile = state
            .store
            .find_by_username(&claims.sub)
            .await
            .context("Failed to load caller profile")?
            .ok_or_else(|| {
                debug!(username = %claims.sub, "Token subject has no profile");
                AppError::unauthorized(USER_NOT_FOUND)
            })?;

        Span::current().record("caller", profile.username());
        Ok(AuthUser(profile))
    }
}
