use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use ozp_core::ErrorResponse;
use ozp_models::{
    Account, AccountSummary, Group, Organization, OrganizationRef, ProfileSummary, ProfileUpdate,
    ProfileView, Role, SelfProfileUpdate,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::profiles::controller::list_profiles,
        crate::modules::profiles::controller::get_profile,
        crate::modules::profiles::controller::update_profile,
        crate::modules::profiles::controller::get_self_profile,
        crate::modules::profiles::controller::update_self_profile,
    ),
    components(
        schemas(
            Role,
            Group,
            Account,
            AccountSummary,
            Organization,
            OrganizationRef,
            ProfileView,
            ProfileSummary,
            ProfileUpdate,
            SelfProfileUpdate,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Profiles", description = "Profile listing and administrative updates"),
        (name = "Self", description = "The caller's own profile")
    ),
    info(
        title = "OZP Center API",
        version = "0.1.0",
        description = "Profile and role management for the Apps Mall, built with Rust and Axum.",
        license(
            name = "Apache-2.0"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_profile_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/api/profile/".to_string()));
        assert!(paths.contains(&"/api/profile/{id}/".to_string()));
        assert!(paths.contains(&"/api/self/profile/".to_string()));
    }
}
