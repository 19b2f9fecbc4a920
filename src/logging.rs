//! Middleware that logs each request and response, including their bodies.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// How many body bytes are logged at the `info` level before truncating.
pub const LOG_BODY_PREVIEW_LIMIT: usize = 64;

/// Log each request and its response at the `info` level.
///
/// Bodies longer than [LOG_BODY_PREVIEW_LIMIT] bytes are truncated in the
/// `info` log and written in full at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = read_body(body).await;
    log_payload("Received request", &format!("{parts:#?}"), &body_text);

    let response = next.run(Request::from_parts(parts, body_text.into())).await;

    let (parts, body) = response.into_parts();
    let body_text = read_body(body).await;
    log_payload("Sending response", &format!("{parts:#?}"), &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    String::from_utf8_lossy(&bytes).to_string()
}

fn log_payload(label: &str, parts: &str, body: &str) {
    match body.char_indices().nth(LOG_BODY_PREVIEW_LIMIT) {
        Some((preview_end, _)) => {
            tracing::info!("{label}: {parts}\nbody: {}...", &body[..preview_end]);
            tracing::debug!("Full body: {body:?}");
        }
        None => tracing::info!("{label}: {parts}\nbody: {body:?}"),
    }
}
