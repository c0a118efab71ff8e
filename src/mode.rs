//! Transport mode: how MCP clients reach the server.
//!
//! Passed as `--transport` on the command line.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Transport the server listens on. Defaults to [`TransportMode::Stdio`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// Streamable HTTP on `http_port`, mounted at `/mcp`.
    Http,
}
