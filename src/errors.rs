//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing, resolution or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// Content document is not well-formed JSON.
    Parse(String),
    /// Content document violates the content schema.
    Schema(ValidationError),
    /// Two prompts collapse to the same external name.
    DuplicatePrompt(String),
    /// A single prompt invocation failed.
    Prompt(PromptError),
    /// Requested prompt, tool or resource does not exist.
    NotFound(String),
    /// MCP protocol or transport failure.
    Mcp(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Parse(msg) => write!(f, "parse: {msg}"),
            Self::Schema(err) => write!(f, "schema: {err}"),
            Self::DuplicatePrompt(name) => write!(f, "duplicate prompt name: {name}"),
            Self::Prompt(err) => write!(f, "prompt: {err}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Mcp(msg) => write!(f, "mcp: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Prompt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("invalid JSON in content file: {err}"))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Schema(err)
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        Self::Prompt(err)
    }
}

/// Structural violation found while validating a content document.
///
/// `path` uses dotted keys and bracketed indices, e.g.
/// `prompts.learning.learning_plan_prompt.arguments[0].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Location of the offending value inside the document.
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// Build a validation error for `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure of one compiled prompt invocation.
///
/// These never affect other registered prompts; the host runtime converts
/// them into its own error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// A required argument was not supplied.
    MissingArgument {
        /// Declared name of the missing argument.
        argument_name: String,
    },
    /// The caller supplied an argument the prompt does not declare.
    UnknownArgument {
        /// Name supplied by the caller.
        argument_name: String,
    },
    /// A supplied value cannot be coerced to the declared type.
    ArgumentType {
        /// Declared name of the argument.
        argument_name: String,
        /// Declared type (`string`, `number` or `boolean`).
        expected: &'static str,
        /// Offending value as received.
        value: String,
    },
    /// The template references a placeholder with no resolved argument.
    TemplateRender {
        /// Placeholder name without braces.
        placeholder: String,
    },
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArgument { argument_name } => {
                write!(f, "required argument missing: {argument_name}")
            }
            Self::UnknownArgument { argument_name } => {
                write!(f, "unknown argument: {argument_name}")
            }
            Self::ArgumentType {
                argument_name,
                expected,
                value,
            } => write!(
                f,
                "argument '{argument_name}' must be a {expected}, got '{value}'"
            ),
            Self::TemplateRender { placeholder } => {
                write!(f, "template placeholder has no value: {{{placeholder}}}")
            }
        }
    }
}

impl std::error::Error for PromptError {}
