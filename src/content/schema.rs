//! Structural validation of a content document.
//!
//! A small recursive validator over [`serde_json::Value`] that matches the
//! content schema exactly. Validation stops at the first violation and
//! reports it with a path such as
//! `prompts.learning.learning_plan_prompt.arguments[0].name`.
//!
//! Checks run in this order: top-level shape, `tips`, `messages`,
//! `prompts` (prompt fields, then argument fields).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// Message category whose templates must all contain `{name}`.
pub const GREETINGS_CATEGORY: &str = "greetings";

/// Placeholder every greeting template must contain.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Top-level sections understood by the validator.
const SECTIONS: [&str; 3] = ["tips", "messages", "prompts"];

const ROLES: [&str; 3] = ["user", "assistant", "system"];

const ARGUMENT_TYPES: [&str; 3] = ["string", "number", "boolean"];

static IDENTIFIER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok());

/// Returns `true` when `candidate` matches `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(candidate: &str) -> bool {
    IDENTIFIER
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(candidate))
}

type Outcome = Result<(), ValidationError>;

/// Validate a parsed content document.
///
/// Pure function; unknown top-level keys are ignored.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(document: &Value) -> Outcome {
    let root = document
        .as_object()
        .ok_or_else(|| ValidationError::new("", "content document must be a JSON object"))?;

    for key in SECTIONS {
        if let Some(section) = root.get(key) {
            if !section.is_object() {
                return Err(ValidationError::new(key, "must be an object"));
            }
        }
    }

    if let Some(tips) = section(root, "tips") {
        for (category, items) in tips {
            let path = format!("tips.{category}");
            check_category_name(&path, category)?;
            check_string_list(&path, items)?;
        }
    }

    if let Some(messages) = section(root, "messages") {
        for (category, items) in messages {
            let path = format!("messages.{category}");
            check_category_name(&path, category)?;
            check_string_list(&path, items)?;
            if category == GREETINGS_CATEGORY {
                check_greetings(&path, items)?;
            }
        }
    }

    if let Some(prompts) = section(root, "prompts") {
        for (category, entries) in prompts {
            let path = format!("prompts.{category}");
            check_category_name(&path, category)?;
            let entries = entries
                .as_object()
                .ok_or_else(|| ValidationError::new(&path, "prompt category must be an object"))?;
            for (key, prompt) in entries {
                check_prompt(&format!("{path}.{key}"), key, prompt)?;
            }
        }
    }

    Ok(())
}

fn section<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    root.get(key).and_then(Value::as_object)
}

fn check_category_name(path: &str, category: &str) -> Outcome {
    if is_identifier(category) {
        Ok(())
    } else {
        Err(ValidationError::new(
            path,
            format!("category name '{category}' must match [A-Za-z_][A-Za-z0-9_]*"),
        ))
    }
}

fn check_string_list(path: &str, items: &Value) -> Outcome {
    let items = items
        .as_array()
        .ok_or_else(|| ValidationError::new(path, "must be an array of strings"))?;
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{index}]");
        match item.as_str() {
            Some(text) if !text.is_empty() => {}
            Some(_) => return Err(ValidationError::new(item_path, "must not be empty")),
            None => return Err(ValidationError::new(item_path, "must be a string")),
        }
    }
    Ok(())
}

fn check_greetings(path: &str, items: &Value) -> Outcome {
    let items = items.as_array().map(Vec::as_slice).unwrap_or_default();
    if items.is_empty() {
        return Err(ValidationError::new(
            path,
            "greetings must contain at least one template",
        ));
    }
    for (index, item) in items.iter().enumerate() {
        if !item.as_str().is_some_and(|s| s.contains(NAME_PLACEHOLDER)) {
            return Err(ValidationError::new(
                format!("{path}[{index}]"),
                format!("greeting must contain the {NAME_PLACEHOLDER} placeholder"),
            ));
        }
    }
    Ok(())
}

fn check_prompt(path: &str, key: &str, prompt: &Value) -> Outcome {
    if !is_identifier(key) {
        return Err(ValidationError::new(
            path,
            format!("prompt key '{key}' must match [A-Za-z_][A-Za-z0-9_]*"),
        ));
    }

    let prompt = prompt
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "prompt must be an object"))?;

    non_empty_string(path, prompt, "template")?;
    non_empty_string(path, prompt, "description")?;
    identifier_field(path, prompt, "name")?;

    if let Some(role) = prompt.get("role") {
        if !role.as_str().is_some_and(|r| ROLES.contains(&r)) {
            return Err(ValidationError::new(
                format!("{path}.role"),
                "must be one of user, assistant, system",
            ));
        }
    }

    if let Some(arguments) = prompt.get("arguments") {
        let arguments_path = format!("{path}.arguments");
        let arguments = arguments
            .as_array()
            .ok_or_else(|| ValidationError::new(&arguments_path, "must be an array"))?;
        let mut seen = HashSet::new();
        for (index, argument) in arguments.iter().enumerate() {
            let argument_path = format!("{arguments_path}[{index}]");
            let name = check_argument(&argument_path, argument)?;
            if !seen.insert(name) {
                return Err(ValidationError::new(
                    format!("{argument_path}.name"),
                    format!("duplicate argument name '{name}'"),
                ));
            }
        }
    }

    Ok(())
}

fn check_argument<'a>(path: &str, argument: &'a Value) -> Result<&'a str, ValidationError> {
    let argument = argument
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "argument must be an object"))?;

    non_empty_string(path, argument, "description")?;
    let name = identifier_field(path, argument, "name")?;

    if let Some(kind) = argument.get("type") {
        if !kind.as_str().is_some_and(|k| ARGUMENT_TYPES.contains(&k)) {
            return Err(ValidationError::new(
                format!("{path}.type"),
                "must be one of string, number, boolean",
            ));
        }
    }

    if let Some(required) = argument.get("required") {
        if !required.is_boolean() {
            return Err(ValidationError::new(
                format!("{path}.required"),
                "must be a boolean",
            ));
        }
    }

    if let Some(default) = argument.get("default") {
        if default.is_array() || default.is_object() {
            return Err(ValidationError::new(
                format!("{path}.default"),
                "must be a string, number, boolean or null",
            ));
        }
    }

    Ok(name)
}

fn non_empty_string<'a>(
    path: &str,
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ValidationError> {
    let field_path = format!("{path}.{field}");
    match object.get(field) {
        None => Err(ValidationError::new(field_path, "is required")),
        Some(Value::String(text)) if text.is_empty() => {
            Err(ValidationError::new(field_path, "must not be empty"))
        }
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ValidationError::new(field_path, "must be a string")),
    }
}

fn identifier_field<'a>(
    path: &str,
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ValidationError> {
    let value = non_empty_string(path, object, field)?;
    if is_identifier(value) {
        Ok(value)
    } else {
        Err(ValidationError::new(
            format!("{path}.{field}"),
            format!("'{value}' must match [A-Za-z_][A-Za-z0-9_]*"),
        ))
    }
}
