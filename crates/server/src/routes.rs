use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::auth::{self, ServerState};

pub mod bookings;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", timestamp: Utc::now() })
}

/// Build the full application router: the open probe route plus the booking
/// API, everything behind the bearer-token middleware (which lets `/health`
/// and preflight through).
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route(
            "/bookings/:id",
            get(bookings::get_booking)
                .patch(bookings::update_booking_status)
                .delete(bookings::delete_booking),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // span per request with method and path, logged at INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // response line carries status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
