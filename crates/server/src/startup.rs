use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::TokenCodec;
use service::mailer::{LogMailer, Mailer};

use crate::{auth, routes};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Token secret and TTL: `[auth]` config section first, env second, then a
/// dev-only default.
fn load_token_settings() -> (String, i64) {
    let mut auth = configs::load_default().map(|cfg| cfg.auth).unwrap_or_default();
    auth.normalize_from_env();
    let secret = if auth.token_secret.trim().is_empty() {
        "dev-secret-change-me".to_string()
    } else {
        auth.token_secret
    };
    (secret, auth.token_ttl_hours)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection
    let db = models::db::connect().await?;

    // Process-wide token codec; rotating the secret logs everyone out
    let (secret, ttl_hours) = load_token_settings();
    let tokens = Arc::new(TokenCodec::new(&secret, chrono::Duration::hours(ttl_hours)));

    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

    let state = auth::ServerState { db, tokens, mailer };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting marketplace server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
