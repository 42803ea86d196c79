//! GitPulse server: the HTTP shell around the stats aggregator.
//!
//! One router, one lookup route. The aggregator fans out to the upstream
//! stat services and the handlers map its verdict onto the JSON wire
//! contract the dashboard frontend consumes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use pulse_logging::{pulse_info, pulse_warn};
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use config::Config;
use routes::{missing_username_handler, stats_handler};
use state::AppState;

/// The router with its CORS layer, ready to serve.
pub fn app(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                pulse_warn!("Ignoring malformed allowed origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/stats", get(missing_username_handler))
        .route("/api/stats/", get(missing_username_handler))
        .route("/api/stats/{username}", get(stats_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(config)?;

    let address = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    pulse_info!("Server listening on {}", address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pulse_info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        pulse_info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        pulse_info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
