use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use devdemo_core::timing::RequestTimer;

use crate::app_state::AppState;

/// Time one request and record it as
/// `http_requests_total{method, endpoint, status}` plus
/// `http_request_duration_seconds{endpoint}`.
///
/// The endpoint label is the matched route template (`/items/:id`), or the raw
/// path when no route matched. If `next` never yields a response (panic or
/// cancellation), the timer records status `error` when it is dropped and the
/// panic keeps unwinding.
pub async fn track_http(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let timer = RequestTimer::start(state.metrics(), method, endpoint);

    let response = next.run(req).await;

    let status = response.status();
    tracing::debug!(
        method = %timer.method(),
        endpoint = %timer.endpoint(),
        status = status.as_u16(),
        elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0,
        "request"
    );
    timer.finish(status.as_u16());

    response
}
