use std::time::Duration;

use axum::{Router, http::StatusCode};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::infrastructure::settings::Settings;

#[derive(Debug, Clone, Copy)]
pub(crate) struct HttpLimits {
    pub(crate) body_limit_bytes: usize,
    pub(crate) max_in_flight: usize,
    pub(crate) request_timeout: Duration,
}

impl From<&Settings> for HttpLimits {
    fn from(settings: &Settings) -> Self {
        Self {
            body_limit_bytes: settings.http_request_body_limit_bytes,
            max_in_flight: settings.http_concurrency_limit,
            request_timeout: Duration::from_secs(settings.http_request_timeout_secs),
        }
    }
}

/// Caps in-flight requests across the whole router, then body size and latency.
pub(crate) fn apply_limits(router: Router, limits: HttpLimits) -> Router {
    router
        .layer(GlobalConcurrencyLimitLayer::new(limits.max_in_flight))
        .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            limits.request_timeout,
        ))
}
