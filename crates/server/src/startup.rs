use std::{env, net::SocketAddr, path::Path};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;
use service::{file::bookings::BookingService, runtime};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file pass: normalized and validated when readable, built-in
/// defaults when missing or rejected.
fn load_config() -> configs::AppConfig {
    configs::AppConfig::load_and_validate().unwrap_or_default()
}

/// Load host/port from env vars or configs, with sensible fallbacks
fn load_bind_addr(cfg: &configs::AppConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.server.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.server.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Bearer key shared with the SPA: env wins, then config, then a dev default.
fn resolve_api_key(cfg: &configs::AppConfig) -> String {
    env::var("BOOKING_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            let key = cfg.auth.api_key.trim();
            (!key.is_empty()).then(|| key.to_string())
        })
        .unwrap_or_else(|| "dev-key-change-me".to_string())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();

    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| cfg.storage.data_dir.clone());
    runtime::ensure_env(&data_dir).await?;

    // Booking records live in a single JSON file under the data dir
    let bookings = BookingService::new(Path::new(&data_dir).join("bookings.json")).await?;

    let api_key = resolve_api_key(&cfg);
    let state = ServerState {
        bookings,
        auth: ServerAuthConfig { api_key },
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    // Bind and serve
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting booking server");
    println!("starting booking server at {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
