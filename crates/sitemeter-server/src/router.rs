//! Axum router wiring.
//!
//! Every route, including 404s, goes through the response-time middleware.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, middleware::response_time, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), response_time::track))
        .with_state(state)
}
