//! MobileGuru relay server entry point.
//!
//! Serves `POST /chat` for browser clients, injecting the MobileGuru persona
//! and the server-held GEMINI_API_KEY before forwarding upstream.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... PORT=3000 mobileguru-relay
//! ```

use std::env;

use tracing_subscriber::EnvFilter;

use mobileguru::persona::MOBILE_GURU;
use mobileguru::server::{AppState, build_router};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let state = AppState::from_env(MOBILE_GURU)?;
    if !state.has_credential() {
        tracing::warn!("GEMINI_API_KEY is not set; every /chat request will answer 500");
    }

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "MobileGuru relay listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
