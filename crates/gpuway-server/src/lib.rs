//! Development server for gpuway.
//!
//! Renders pages on demand with axum. Every request re-reads the page's
//! template fragments, so template edits show up on reload.
//!
//! - `GET <route>`: page whose route path equals the request path exactly,
//!   404 if none, 500 if rendering fails
//! - `GET /static/<path>`: files from the static assets directory
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use gpuway_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8080,
//!         templates_dir: PathBuf::from("templates"),
//!         static_dir: PathBuf::from("static"),
//!     };
//!     let registry = gpuway_site::default_registry().unwrap();
//!
//!     run_server(config, registry).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use gpuway_site::{Registry, Site};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Templates root.
    pub templates_dir: PathBuf,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Build the router serving `site` and the files in `static_dir`.
pub fn router(site: Site, static_dir: &Path) -> Router {
    let state = Arc::new(AppState { site });
    app::create_router(state, static_dir)
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(
    config: ServerConfig,
    registry: Registry,
) -> Result<(), Box<dyn std::error::Error>> {
    let site = Site::new(registry, config.templates_dir.clone());
    let pages = site.registry().len();
    let app = router(site, &config.static_dir);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, pages, "Starting development server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from gpuway config.
#[must_use]
pub fn server_config_from_config(config: &gpuway_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        templates_dir: config.site_resolved.templates_dir.clone(),
        static_dir: config.site_resolved.static_dir.clone(),
    }
}
