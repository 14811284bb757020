//! API middleware (bearer auth, request logging)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::info;

use super::handlers::AppState;
use crate::models::errors::AppError;

/// Bearer-token gate for mutating routes.
///
/// Reads the Authorization header, takes the token after the scheme, and
/// compares it against the configured secret by equality. Read-only
/// routes never pass through here.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_whitespace().nth(1));

    let Some(token) = token else {
        return Err(AppError::missing_token());
    };

    let Some(expected) = state.config.bearer_token.as_deref() else {
        return Err(AppError::service_unavailable(
            "Bearer token is not configured on this server",
        ));
    };

    if token != expected {
        return Err(AppError::invalid_token());
    }

    Ok(next.run(request).await)
}

/// Request logging middleware.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %latency.as_millis(),
        "Request completed"
    );

    response
}
