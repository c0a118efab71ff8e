//! Stdio and streamable-HTTP transports for [`ContentServer`].

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::handler::ContentServer;
use crate::{AppError, Result};

/// Handler for `GET /health`.
async fn health() -> &'static str {
    "ok"
}

/// Serve the MCP server over stdio until the client disconnects or the
/// cancellation token fires.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the transport fails to initialize.
pub async fn serve_stdio(server: ContentServer, ct: CancellationToken) -> Result<()> {
    info!("starting stdio MCP transport");
    let service = server
        .serve_with_ct(stdio(), ct)
        .await
        .map_err(|err| AppError::Mcp(format!("stdio transport failed: {err}")))?;

    service
        .waiting()
        .await
        .map_err(|err| AppError::Mcp(format!("stdio service error: {err}")))?;

    info!("stdio MCP transport shut down");
    Ok(())
}

/// Build the axum router: MCP at `/mcp`, liveness at `/health`.
#[must_use]
pub fn http_router(server: ContentServer) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .nest_service("/mcp", service)
        .route("/health", get(health))
}

/// Serve the streamable-HTTP transport on `127.0.0.1:<port>`.
///
/// # Errors
///
/// Returns `AppError::Mcp` if the listener cannot bind or the server fails.
pub async fn serve_http(server: ContentServer, port: u16, ct: CancellationToken) -> Result<()> {
    let bind = SocketAddr::from(([127, 0, 0, 1], port));
    let router = http_router(server);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Mcp(format!("failed to bind HTTP on {bind}: {err}")))?;

    info!(%bind, "starting streamable HTTP MCP transport");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Mcp(format!("HTTP server error: {err}")))?;

    info!("streamable HTTP MCP transport shut down");
    Ok(())
}
