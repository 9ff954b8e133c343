//! Axum router wiring.
//!
//! Every route, the ops endpoints included, sits behind [`obs::track_http`].
//! Requests that match no route reach the JSON 404 fallback through the same
//! layer and are labelled with their raw path.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, obs, ops, services};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/echo", post(services::echo::echo))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), obs::track_http))
        .with_state(state)
}
