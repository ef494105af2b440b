use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ozp_auth::create_access_token;
use ozp_config::{CorsConfig, JwtConfig, VisibilityPolicy};
use ozp_db::{InMemoryProfileRepository, ProfileStore};
use ozpcenter::router::init_router;
use ozpcenter::state::AppState;

/// Sample profile ids, in seeding order.
#[allow(dead_code)]
pub mod sample_ids {
    pub const WSMITH: i64 = 1;
    pub const JULIA: i64 = 2;
    pub const OBRIEN: i64 = 3;
    pub const BIGBROTHER: i64 = 4;
    pub const BIGBROTHER2: i64 = 5;
    pub const AARONSON: i64 = 6;
    pub const JONES: i64 = 7;
}

/// A fresh app over the sample dataset.
pub fn setup_test_app(visibility: VisibilityPolicy) -> Router {
    let state = AppState {
        store: ProfileStore::Memory(InMemoryProfileRepository::with_sample_data()),
        jwt_config: JwtConfig::default(),
        cors_config: CorsConfig::default(),
        visibility,
    };
    init_router(state)
}

pub fn token_for(username: &str) -> String {
    create_access_token(username, &JwtConfig::default()).unwrap()
}

/// Sends `request` and returns the status with the JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

#[allow(dead_code)]
pub fn get(uri: &str, username: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(username)))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn put_json(uri: &str, username: &str, body: &Value) -> Request<Body> {
    with_json_body("PUT", uri, username, body)
}

#[allow(dead_code)]
pub fn with_json_body(method: &str, uri: &str, username: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(username)))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub fn usernames(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["user"]["username"].as_str().unwrap().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn titles(organizations: &Value) -> Vec<String> {
    organizations
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["title"].as_str().unwrap().to_string())
        .collect()
}
