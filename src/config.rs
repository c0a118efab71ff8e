//! Server configuration parsing, validation, and content-source resolution.

use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::content::schema::is_identifier;
use crate::{AppError, Result};

/// Environment variable naming the content document when no explicit path
/// is given on the command line.
pub const CONTENT_PATH_ENV: &str = "TIPS_JSON_PATH";

fn default_server_name() -> String {
    "MCP test".into()
}

fn default_http_port() -> u16 {
    3000
}

fn default_tip_category() -> String {
    crate::content::store::DEFAULT_TIP_CATEGORY.into()
}

fn default_greeting_name() -> String {
    "User".into()
}

/// Server settings parsed from an optional `config.toml`.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Name advertised to MCP clients.
    #[serde(default = "default_server_name")]
    pub server_name: String,
    /// Optional usage instructions advertised to MCP clients.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Port for the streamable HTTP transport.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Tip category returned when a caller does not name one.
    #[serde(default = "default_tip_category")]
    pub default_tip_category: String,
    /// Name used by `generate_greeting` when the caller omits one.
    #[serde(default = "default_greeting_name")]
    pub default_greeting_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            instructions: None,
            http_port: default_http_port(),
            default_tip_category: default_tip_category(),
            default_greeting_name: default_greeting_name(),
        }
    }
}

impl ServerConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server_name.trim().is_empty() {
            return Err(AppError::Config("server_name must not be empty".into()));
        }

        if !is_identifier(&self.default_tip_category) {
            return Err(AppError::Config(format!(
                "default_tip_category '{}' must match [A-Za-z_][A-Za-z0-9_]*",
                self.default_tip_category
            )));
        }

        if self.default_greeting_name.trim().is_empty() {
            return Err(AppError::Config(
                "default_greeting_name must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Where the content document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Path given on the command line.
    Explicit(PathBuf),
    /// Path taken from [`CONTENT_PATH_ENV`].
    Environment(PathBuf),
    /// Compiled-in fallback document.
    BuiltIn,
}

impl ContentSource {
    /// Resolve the source: explicit path, then a non-empty environment
    /// value, then the built-in document.
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>, env_value: Option<String>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path);
        }
        match env_value {
            Some(value) if !value.trim().is_empty() => Self::Environment(PathBuf::from(value)),
            _ => Self::BuiltIn,
        }
    }

    /// [`Self::resolve`] against the live process environment.
    #[must_use]
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self::resolve(explicit, env::var(CONTENT_PATH_ENV).ok())
    }

    /// File path backing this source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Environment(path) => Some(path),
            Self::BuiltIn => None,
        }
    }
}

impl Display for ContentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{}", path.display()),
            Self::Environment(path) => write!(f, "{} (from {CONTENT_PATH_ENV})", path.display()),
            Self::BuiltIn => f.write_str("built-in content"),
        }
    }
}
