use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use tracing::instrument;

use ozp_core::{AppError, ErrorResponse};
use ozp_models::{ProfileId, ProfileSummary, ProfileUpdate, ProfileView, SelfProfileUpdate};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAppsMallSteward;
use crate::modules::profiles::model::{ProfileListFilter, ProfileListParams};
use crate::modules::profiles::service::ProfileService;
use crate::state::AppState;
use crate::validator::ValidatedPayload;

/// Non-numeric ids cannot name a profile.
fn profile_id(path: Result<Path<ProfileId>, PathRejection>) -> Result<ProfileId, AppError> {
    path.map(|Path(id)| id).map_err(|_| AppError::not_found())
}

type QueryPairs = Vec<(String, String)>;

fn list_params(
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<ProfileListParams, AppError> {
    let Query(pairs) = query.map_err(|e| {
        AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e.body_text()))
    })?;
    Ok(ProfileListParams::from_pairs(pairs))
}

#[utoipa::path(
    get,
    path = "/api/profile/",
    params(ProfileListParams),
    responses(
        (status = 200, description = "Profiles visible to the caller, ordered by id", body = Vec<ProfileSummary>),
        (status = 400, description = "Unknown role", body = Object),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profiles"
)]
#[instrument(skip(state, auth_user, query), fields(caller = %auth_user.username()))]
pub async fn list_profiles(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<ProfileSummary>>, AppError> {
    let params = list_params(query)?;
    let filter = ProfileListFilter::try_from(params).map_err(AppError::validation)?;
    let profiles =
        ProfileService::list_profiles(&state.store, auth_user.profile(), state.visibility, filter)
            .await?;
    Ok(Json(profiles))
}

#[utoipa::path(
    get,
    path = "/api/profile/{id}/",
    params(
        ("id" = i64, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile details", body = ProfileView),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Profile not found or not visible", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profiles"
)]
#[instrument(skip(state, auth_user, path), fields(caller = %auth_user.username()))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<ProfileId>, PathRejection>,
) -> Result<Json<ProfileView>, AppError> {
    let id = profile_id(path)?;
    let profile =
        ProfileService::get_profile(&state.store, auth_user.profile(), state.visibility, id)
            .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/profile/{id}/",
    params(
        ("id" = i64, Path, description = "Profile ID")
    ),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ProfileView),
        (status = 400, description = "Validation failed (field-keyed messages)", body = Object),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - APPS_MALL_STEWARD only", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profiles"
)]
#[instrument(skip(state, auth_user, path, update), fields(caller = %auth_user.username()))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAppsMallSteward(auth_user): RequireAppsMallSteward,
    path: Result<Path<ProfileId>, PathRejection>,
    ValidatedPayload(update): ValidatedPayload<ProfileUpdate>,
) -> Result<Json<ProfileView>, AppError> {
    let id = profile_id(path)?;
    let profile = ProfileService::update_profile(&state.store, id, update).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/self/profile/",
    responses(
        (status = 200, description = "The caller's own profile", body = ProfileView),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Self"
)]
#[instrument(skip(auth_user), fields(caller = %auth_user.username()))]
pub async fn get_self_profile(auth_user: AuthUser) -> Json<ProfileView> {
    Json(ProfileView::from(auth_user.into_profile()))
}

#[utoipa::path(
    put,
    path = "/api/self/profile/",
    request_body = SelfProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ProfileView),
        (status = 400, description = "Validation failed (field-keyed messages)", body = Object),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Self"
)]
#[instrument(skip(state, auth_user, update), fields(caller = %auth_user.username()))]
pub async fn update_self_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPayload(update): ValidatedPayload<SelfProfileUpdate>,
) -> Result<Json<ProfileView>, AppError> {
    let profile =
        ProfileService::update_self(&state.store, auth_user.into_profile(), update).await?;
    Ok(Json(profile))
}
