use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use coursehub_auth::PrincipalKind;
use coursehub_core::GateError;

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if metrics are enabled via METRICS_ENABLED env var
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
/// Returns `Ok(None)` if metrics are disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_metrics_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router for metrics server
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Gate metrics

pub fn track_cache_lookup(hit: bool) {
    if !is_metrics_enabled() {
        return;
    }
    let result = if hit { "hit" } else { "miss" };
    counter!("gate_cache_lookups_total", "result" => result).increment(1);
}

pub fn track_gate_rejection(error: &GateError) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("gate_rejections_total", "reason" => error.reason()).increment(1);
}

pub fn track_cache_invalidation() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("gate_invalidations_total").increment(1);
}

// Business metrics

pub fn track_token_issued(kind: PrincipalKind) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("tokens_issued_total", "kind" => kind.as_str()).increment(1);
}

pub fn track_login_failure(kind: PrincipalKind, reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("login_failures_total", "kind" => kind.as_str(), "reason" => reason).increment(1);
}

pub fn track_content_created(label: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("content_created_total", "type" => label).increment(1);
}
