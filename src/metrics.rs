use anyhow::Context;
use axum::{
    Router, extract::Request, http::StatusCode, middleware::Next, response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::logging::route_path;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Initialize Prometheus metrics exporter with upkeep task
/// Returns None if observability is disabled
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )
        .context("Failed to set buckets")?
        .set_buckets_for_metric(
            Matcher::Full("profiles_listed".to_string()),
            &[0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0],
        )
        .context("Failed to set buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    // Spawn upkeep task to clean stale metrics
    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Coarse status label for dashboards.
fn status_class(status: StatusCode) -> &'static str {
    if status.is_success() {
        "2xx"
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        "denied"
    } else if status.is_client_error() {
        "4xx"
    } else if status.is_server_error() {
        "5xx"
    } else {
        "other"
    }
}

/// Counts requests per route template and records their latency.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let path = route_path(&req);
    let start = Instant::now();

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    let status = response.status();
    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(start.elapsed().as_secs_f64());
    counter!(
        "http_requests_total",
        "method" => method,
        "path" => path,
        "status" => status.as_str().to_owned()
    )
    .increment(1);
    counter!("http_requests_by_status", "status_category" => status_class(status)).increment(1);

    response
}

/// Router for metrics server
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics helpers

/// Profile updates by path (`self` or `admin`).
pub fn track_profile_updated(path: &'static str, stewardship_changed: bool) {
    if !is_observability_enabled() {
        return;
    }
    counter!("profile_updates_total", "path" => path).increment(1);
    if stewardship_changed {
        counter!("stewardship_replacements_total", "path" => path).increment(1);
    }
}

pub fn track_profiles_listed(caller_role: &'static str, count: usize) {
    if !is_observability_enabled() {
        return;
    }
    histogram!("profiles_listed", "caller_role" => caller_role).record(count as f64);
}

pub fn track_authorization_denied(role: &'static str, required: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("authorization_denied_total", "role" => role, "required" => required).increment(1);
}

pub fn track_token_validation(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "valid" } else { "invalid" };
    counter!("jwt_validations_total", "status" => status).increment(1);
}
