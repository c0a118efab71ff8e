#![forbid(unsafe_code)]

//! `content-mcp` server binary.
//!
//! Resolves the content source, builds the prompt catalog, optionally
//! starts the hot-reload watcher and serves MCP over stdio or HTTP.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use content_mcp::catalog::{Catalog, SharedCatalog};
use content_mcp::config::{ContentSource, ServerConfig};
use content_mcp::content_watcher::ContentWatcher;
use content_mcp::mcp::handler::ContentServer;
use content_mcp::mcp::transport;
use content_mcp::mode::TransportMode;
use content_mcp::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "content-mcp",
    about = "MCP demo server with JSON-defined prompts and tips",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the JSON content document (falls back to `TIPS_JSON_PATH`).
    #[arg(short = 'j', long = "json-file")]
    json_file: Option<PathBuf>,

    /// Optional TOML server configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Transport to serve MCP on.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    transport: TransportMode,

    /// Reload the content document when it changes on disk.
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("content-mcp server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let config = match &args.config {
        Some(path) => ServerConfig::load_from_path(path)?,
        None => ServerConfig::default(),
    };
    let config = Arc::new(config);
    info!(server_name = %config.server_name, "configuration loaded");

    // ── Load content and register prompts ───────────────
    let source = ContentSource::from_env(args.json_file);
    let catalog = SharedCatalog::new(Catalog::load(&source, &config).map_err(|err| {
        error!(%err, %source, "failed to load content");
        err
    })?);

    // ── Optional hot reload ─────────────────────────────
    let _watcher = if args.watch {
        if source.path().is_some() {
            Some(ContentWatcher::new(
                source.clone(),
                catalog.clone(),
                Arc::clone(&config),
            )?)
        } else {
            warn!("--watch ignored: built-in content has no file to watch");
            None
        }
    } else {
        None
    };

    // ── Serve ───────────────────────────────────────────
    let server = ContentServer::new(catalog, Arc::clone(&config));
    let ct = CancellationToken::new();

    let serve_ct = ct.clone();
    let transport_mode = args.transport;
    let http_port = config.http_port;
    let mut serve_handle = tokio::spawn(async move {
        match transport_mode {
            TransportMode::Stdio => transport::serve_stdio(server, serve_ct).await,
            TransportMode::Http => transport::serve_http(server, http_port, serve_ct).await,
        }
    });

    info!(transport = ?transport_mode, "MCP server ready");

    // ── Wait for shutdown signal or transport exit ──────
    let finished = tokio::select! {
        () = shutdown_signal() => None,
        finished = &mut serve_handle => Some(finished),
    };
    let outcome = if let Some(outcome) = finished {
        outcome
    } else {
        info!("shutdown signal received");
        ct.cancel();
        serve_handle.await
    };

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            error!(%err, "transport failed");
            return Err(err);
        }
        Err(err) => {
            return Err(AppError::Mcp(format!("transport task panicked: {err}")));
        }
    }

    info!("content-mcp shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the stdio transport, so logs go to stderr.
    let subscriber = fmt().with_env_filter(env_filter).with_writer(io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
