use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use service::file::bookings::BookingService;

use crate::errors::JsonApiError;

/// Static bearer key shared with the SPA.
#[derive(Clone)]
pub struct ServerAuthConfig {
    pub api_key: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub bookings: Arc<BookingService>,
    pub auth: ServerAuthConfig,
}

/// Middleware: require `Authorization: Bearer <key>` on every route.
/// `/health` stays open for probes; OPTIONS passes through so CORS preflight
/// is never challenged.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    if req.method() == Method::OPTIONS || req.uri().path() == "/health" {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string());

    let authorized = matches!(&token, Some(t) if !t.is_empty() && *t == state.auth.api_key);
    if !authorized {
        warn!(path = %req.uri().path(), "rejected request without valid bearer token");
        return Err(JsonApiError::unauthorized());
    }

    Ok(next.run(req).await)
}
