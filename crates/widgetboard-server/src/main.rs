//! Widgetboard HTTP Server
//!
//! Serves the in-memory widget store over a small JSON API. See [`routes`]
//! for the endpoint list.
//!
//! ## Configuration
//!
//! - `WIDGETBOARD_ADDR`: listen address (default `0.0.0.0:3030`)
//! - `RUST_LOG`: log filter (default `widgetboard_server=info,widgetboard_core=info,tower_http=info`)

mod config;
mod error;
mod routes;

use config::{ConfigError, ServerConfig};
use routes::SharedStore;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use widgetboard_core::InMemoryWidgetStore;

/// Startup failures.
#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "widgetboard_server=info,widgetboard_core=info,tower_http=info".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store: SharedStore = Arc::new(InMemoryWidgetStore::new());

    let app = routes::router(store)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Widgetboard server listening on {}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
