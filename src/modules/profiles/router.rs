use crate::modules::profiles::controller::{
    get_profile, get_self_profile, list_profiles, update_profile, update_self_profile,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Profile routes; paths keep their trailing slash.
pub fn init_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/profile/", get(list_profiles))
        .route(
            "/profile/{id}/",
            get(get_profile).put(update_profile).patch(update_profile),
        )
        .route(
            "/self/profile/",
            get(get_self_profile)
                .put(update_self_profile)
                .patch(update_self_profile),
        )
}
