//! Region directory stub server.
//!
//! Serves a static country/state/city dataset over the same routes as the
//! remote directory service, so the form can run with the remote provider
//! against a local process. Data is read once at startup and never changes.
//!
//! Environment:
//! - `INTAKE_STUB_PORT` (default 8091)
//! - `INTAKE_STUB_API_KEY`: when set, region routes require it in the
//!   API key header
//! - `INTAKE_STUB_API_KEY_HEADER` (default `X-CSCAPI-KEY`)
//! - `INTAKE_DIRECTORY_FILE`: JSON/YAML dataset (default: built-in)

mod routes;
mod store;

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderName;
use intake_directory::config::DEFAULT_API_KEY_HEADER;
use intake_directory::LocalDirectory;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8091;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("INTAKE_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let directory = match std::env::var("INTAKE_DIRECTORY_FILE") {
        Ok(path) if !path.trim().is_empty() => LocalDirectory::from_path(&path)
            .with_context(|| format!("loading dataset {path}"))?,
        _ => LocalDirectory::builtin(),
    };
    let api_key = std::env::var("INTAKE_STUB_API_KEY").ok();
    if api_key.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("INTAKE_STUB_API_KEY not set; region routes are unauthenticated");
    }

    let header = std::env::var("INTAKE_STUB_API_KEY_HEADER")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string());
    let api_key_header = HeaderName::from_bytes(header.trim().as_bytes())
        .with_context(|| format!("invalid INTAKE_STUB_API_KEY_HEADER {header:?}"))?;

    let state = store::AppState::new(directory, api_key, api_key_header);
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("intake-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;
    Ok(())
}
