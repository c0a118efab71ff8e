#![forbid(unsafe_code)]

//! `content-mcp`: an MCP demo server whose prompts, tips and greeting
//! templates come from a validated JSON content document.

pub mod catalog;
pub mod config;
pub mod content;
pub mod content_watcher;
pub mod errors;
pub mod mcp;
pub mod mode;
pub mod prompts;

pub use catalog::{Catalog, SharedCatalog};
pub use config::{ContentSource, ServerConfig};
pub use errors::{AppError, Result};
