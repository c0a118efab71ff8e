//! MCP tool handlers.

pub mod greeting;
pub mod time;
pub mod tips;
