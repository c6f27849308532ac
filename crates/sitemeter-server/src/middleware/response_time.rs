//! Response-time middleware.
//!
//! Records every request into the histogram registered at startup, bumps the
//! request counter, and reports the elapsed time in `X-Response-Time`.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

pub async fn track(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());

    let start = Instant::now();
    let mut res = next.run(req).await;
    let elapsed = start.elapsed();

    let status = res.status().as_u16().to_string();
    let metrics = state.metrics();
    metrics.request_operations.inc(&[]);
    metrics.request_duration.observe(
        &[("method", method.as_str()), ("status_code", status.as_str()), ("route", route.as_str())],
        elapsed,
    );

    let ms = format!("{:.3}ms", elapsed.as_secs_f64() * 1000.0);
    if let Ok(v) = HeaderValue::from_str(&ms) {
        res.headers_mut().insert(RESPONSE_TIME_HEADER, v);
    }

    tracing::debug!(%method, %route, status = %status, elapsed_ms = %ms, "request served");
    res
}
