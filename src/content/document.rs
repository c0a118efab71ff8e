//! Typed model of the content document: tips, message templates and
//! prompt definitions.
//!
//! Categories are kept as ordered `(name, items)` pairs so that every
//! enumeration follows the declaration order of the source JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema;
use crate::Result;

/// Ordered list of `(category, strings)` pairs.
pub type StringSection = Vec<(String, Vec<String>)>;

/// Ordered list of `(category, [(prompt key, definition)])` pairs.
pub type PromptSection = Vec<(String, Vec<(String, PromptDefinition)>)>;

/// Message role attached to a rendered prompt.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End-user turn. Default.
    #[default]
    User,
    /// Model turn.
    Assistant,
    /// System instruction.
    System,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// Declared type of a prompt argument.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentType {
    /// Free text, passed through unchanged. Default.
    #[default]
    String,
    /// Decimal number.
    Number,
    /// `true` / `false`.
    Boolean,
}

impl ArgumentType {
    /// Schema name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// One declared argument of a prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArgumentSpec {
    /// Identifier used as the `{placeholder}` name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the caller must supply a value.
    #[serde(default)]
    pub required: bool,
    /// Fallback value for optional arguments; ignored when `required`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Declared type.
    #[serde(default, rename = "type")]
    pub kind: ArgumentType,
}

/// Declarative description of one prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptDefinition {
    /// Identifier of the prompt; ideally equal to its map key.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared arguments in declaration order.
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    /// Message template containing `{argument_name}` placeholders.
    pub template: String,
    /// Role of the rendered message.
    #[serde(default)]
    pub role: Role,
}

/// Root content document. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentDocument {
    /// Tip categories.
    pub tips: StringSection,
    /// Message-template categories.
    pub messages: StringSection,
    /// Prompt definitions grouped by category.
    pub prompts: PromptSection,
}

impl ContentDocument {
    /// Parse a JSON string, validate it and build the typed document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Parse` for malformed JSON and `AppError::Schema`
    /// for structural violations.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }

    /// Validate a parsed JSON tree and build the typed document.
    ///
    /// Unknown top-level keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Schema` when the tree violates the content schema.
    pub fn from_value(value: &Value) -> Result<Self> {
        schema::validate(value)?;

        // Validation guarantees the shapes below; absent keys are empty.
        let tips = string_section(section(value, "tips"))?;
        let messages = string_section(section(value, "messages"))?;

        let mut prompts = Vec::new();
        for (category, entries) in section(value, "prompts").into_iter().flatten() {
            let mut definitions = Vec::new();
            if let Some(entries) = entries.as_object() {
                for (key, raw) in entries {
                    let definition: PromptDefinition = serde_json::from_value(raw.clone())?;
                    definitions.push((key.clone(), definition));
                }
            }
            prompts.push((category.clone(), definitions));
        }

        Ok(Self {
            tips,
            messages,
            prompts,
        })
    }
}

fn section<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

fn string_section(map: Option<&Map<String, Value>>) -> Result<StringSection> {
    map.into_iter()
        .flatten()
        .map(|(category, items)| -> Result<(String, Vec<String>)> {
            let items: Vec<String> = serde_json::from_value(items.clone())?;
            Ok((category.clone(), items))
        })
        .collect()
}
