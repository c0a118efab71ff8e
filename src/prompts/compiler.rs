//! Turns a [`PromptDefinition`] into an invocable [`CompiledPrompt`].
//!
//! Every compiled prompt shares the same resolve-and-render routine; only
//! the captured definition differs.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::template;
use crate::content::document::{ArgumentSpec, ArgumentType, PromptDefinition, Role};
use crate::errors::PromptError;

/// Caller-supplied keyword arguments.
pub type CallArguments = Map<String, Value>;

/// A resolved, type-coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// `string` arguments.
    Text(String),
    /// `number` arguments.
    Number(f64),
    /// `boolean` arguments.
    Bool(bool),
}

impl Display for ArgValue {
    /// Locale-independent textual form: `3`, `2.5`, `true`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

/// A single rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    /// Role copied from the definition.
    pub role: Role,
    /// Template with every placeholder substituted.
    pub content: String,
}

/// Build the external name `category_prompt`.
#[must_use]
pub fn external_name(category: &str, prompt_name: &str) -> String {
    format!("{category}_{prompt_name}")
}

/// A prompt definition bound to its external name, ready to be invoked.
#[derive(Debug, Clone)]
pub struct CompiledPrompt {
    external_name: String,
    category: String,
    definition: PromptDefinition,
}

/// Compile one prompt definition.
#[must_use]
pub fn compile(category: &str, prompt_name: &str, definition: &PromptDefinition) -> CompiledPrompt {
    CompiledPrompt {
        external_name: external_name(category, prompt_name),
        category: category.to_owned(),
        definition: definition.clone(),
    }
}

impl CompiledPrompt {
    /// Name under which the prompt is exposed (`category_prompt`).
    #[must_use]
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    /// Category the prompt was declared under.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.definition.description
    }

    /// Declared arguments in declaration order.
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.definition.arguments
    }

    /// Role of the rendered message.
    #[must_use]
    pub fn role(&self) -> Role {
        self.definition.role
    }

    /// Raw template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.definition.template
    }

    /// Resolve caller arguments against the declared argument list.
    ///
    /// Undeclared keys are rejected before anything else. A JSON `null`
    /// counts as not supplied.
    ///
    /// # Errors
    ///
    /// Returns `UnknownArgument`, `MissingArgument` or `ArgumentType`.
    pub fn resolve_arguments(
        &self,
        supplied: &CallArguments,
    ) -> Result<HashMap<&str, ArgValue>, PromptError> {
        if let Some(unknown) = supplied
            .keys()
            .find(|key| !self.arguments().iter().any(|spec| &spec.name == *key))
        {
            return Err(PromptError::UnknownArgument {
                argument_name: unknown.clone(),
            });
        }

        let mut resolved = HashMap::with_capacity(self.arguments().len());
        for spec in self.arguments() {
            let value = match supplied.get(&spec.name).filter(|v| !v.is_null()) {
                Some(value) => coerce(spec, value)?,
                None if spec.required => {
                    return Err(PromptError::MissingArgument {
                        argument_name: spec.name.clone(),
                    });
                }
                None => match spec.default.as_ref().filter(|v| !v.is_null()) {
                    Some(default) => coerce(spec, default)?,
                    None => ArgValue::Text(String::new()),
                },
            };
            resolved.insert(spec.name.as_str(), value);
        }
        Ok(resolved)
    }

    /// Resolve arguments and render the template into one message.
    ///
    /// # Errors
    ///
    /// Any argument error from [`Self::resolve_arguments`], or
    /// `TemplateRender` when the template names a placeholder that no
    /// declared argument resolves.
    pub fn render(&self, supplied: &CallArguments) -> Result<RenderedPrompt, PromptError> {
        let resolved = self.resolve_arguments(supplied)?;
        let content = template::render(&self.definition.template, |name| {
            resolved.get(name).map(ToString::to_string)
        })?;

        debug!(
            prompt = %self.external_name,
            arguments = resolved.len(),
            "rendered prompt"
        );

        Ok(RenderedPrompt {
            role: self.definition.role,
            content,
        })
    }

    /// Invoke the prompt: a sequence containing exactly one message.
    ///
    /// # Errors
    ///
    /// Same as [`Self::render`].
    pub fn call(&self, supplied: &CallArguments) -> Result<Vec<RenderedPrompt>, PromptError> {
        self.render(supplied).map(|message| vec![message])
    }

    /// Placeholders in the template that no declared argument covers.
    ///
    /// These are tolerated at load time but fail at render time.
    #[must_use]
    pub fn undeclared_placeholders(&self) -> Vec<&str> {
        template::placeholders(&self.definition.template)
            .into_iter()
            .filter(|name| !self.arguments().iter().any(|spec| spec.name == *name))
            .collect()
    }
}

/// Coerce a JSON value to the declared argument type.
fn coerce(spec: &ArgumentSpec, value: &Value) -> Result<ArgValue, PromptError> {
    let mismatch = || PromptError::ArgumentType {
        argument_name: spec.name.clone(),
        expected: spec.kind.as_str(),
        value: match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    };

    match (spec.kind, value) {
        (ArgumentType::String, Value::String(text)) => Ok(ArgValue::Text(text.clone())),
        (ArgumentType::String, Value::Number(number)) => Ok(ArgValue::Text(number.to_string())),
        (ArgumentType::String, Value::Bool(flag)) => Ok(ArgValue::Text(flag.to_string())),

        (ArgumentType::Number, Value::Number(number)) => {
            number.as_f64().map(ArgValue::Number).ok_or_else(mismatch)
        }
        (ArgumentType::Number, Value::String(text)) => parse_number(text)
            .map(ArgValue::Number)
            .ok_or_else(mismatch),

        (ArgumentType::Boolean, Value::Bool(flag)) => Ok(ArgValue::Bool(*flag)),
        (ArgumentType::Boolean, Value::String(text)) => {
            parse_bool(text).map(ArgValue::Bool).ok_or_else(mismatch)
        }

        _ => Err(mismatch()),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, ignoring ASCII case.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
