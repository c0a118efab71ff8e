//! MCP resource handlers.

pub mod tips;
