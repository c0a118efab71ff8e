//! Unit tests for content-document validation.

use content_mcp::content::schema::validate;
use content_mcp::content::ContentDocument;
use content_mcp::AppError;
use serde_json::{json, Value};

fn prompt_doc(prompt: Value) -> Value {
    json!({ "prompts": { "learning": { "learning_plan_prompt": prompt } } })
}

fn error_path(document: &Value) -> String {
    validate(document).expect_err("document should be rejected").path
}

#[test]
fn empty_document_is_valid() {
    assert!(validate(&json!({})).is_ok());
    let document = ContentDocument::from_value(&json!({})).expect("empty document");
    assert!(document.tips.is_empty());
    assert!(document.prompts.is_empty());
}

#[test]
fn root_must_be_an_object() {
    let err = validate(&json!([1, 2])).expect_err("array root");
    assert_eq!(err.path, "");
    assert_eq!(err.to_string(), "<root>: content document must be a JSON object");
}

#[test]
fn sections_must_be_objects() {
    assert_eq!(error_path(&json!({ "tips": [] })), "tips");
    assert_eq!(error_path(&json!({ "prompts": "x" })), "prompts");
}

#[test]
fn unknown_top_level_keys_are_ignored() {
    assert!(validate(&json!({ "version": 2, "tips": {} })).is_ok());
}

#[test]
fn tip_entries_must_be_non_empty_strings() {
    assert_eq!(
        error_path(&json!({ "tips": { "mcp": ["ok", ""] } })),
        "tips.mcp[1]"
    );
    assert_eq!(error_path(&json!({ "tips": { "mcp": ["ok", 3] } })), "tips.mcp[1]");
    assert_eq!(error_path(&json!({ "tips": { "mcp": "ok" } })), "tips.mcp");
}

#[test]
fn category_names_must_be_identifiers() {
    let err = validate(&json!({ "tips": { "mcp-test": ["x"] } })).expect_err("dash");
    assert_eq!(err.path, "tips.mcp-test");
    assert!(err.message.contains("mcp-test"));
}

#[test]
fn greetings_must_contain_name_placeholder() {
    let document = json!({ "messages": { "greetings": ["Hello {name}", "Hi there"] } });
    let err = validate(&document).expect_err("missing placeholder");
    assert_eq!(err.path, "messages.greetings[1]");
}

#[test]
fn greetings_must_not_be_empty() {
    let err = validate(&json!({ "messages": { "greetings": [] } })).expect_err("empty");
    assert_eq!(err.path, "messages.greetings");
}

#[test]
fn other_message_categories_need_no_placeholder() {
    assert!(validate(&json!({ "messages": { "farewells": ["Bye"] } })).is_ok());
}

#[test]
fn prompt_requires_template_and_description() {
    let document = prompt_doc(json!({ "name": "learning_plan_prompt", "description": "d" }));
    assert_eq!(
        error_path(&document),
        "prompts.learning.learning_plan_prompt.template"
    );

    let document = prompt_doc(json!({ "name": "learning_plan_prompt", "template": "t" }));
    assert_eq!(
        error_path(&document),
        "prompts.learning.learning_plan_prompt.description"
    );
}

#[test]
fn prompt_role_must_be_known() {
    let document = prompt_doc(json!({
        "name": "learning_plan_prompt",
        "description": "d",
        "template": "t",
        "role": "narrator"
    }));
    assert_eq!(
        error_path(&document),
        "prompts.learning.learning_plan_prompt.role"
    );
}

#[test]
fn argument_name_must_be_identifier() {
    let document = prompt_doc(json!({
        "name": "learning_plan_prompt",
        "description": "d",
        "template": "Plan for {topic}",
        "arguments": [{ "name": "1topic", "description": "x" }]
    }));
    let err = validate(&document).expect_err("bad argument name");
    assert_eq!(
        err.path,
        "prompts.learning.learning_plan_prompt.arguments[0].name"
    );
}

#[test]
fn argument_type_and_required_are_checked() {
    let bad_type = prompt_doc(json!({
        "name": "learning_plan_prompt",
        "description": "d",
        "template": "t",
        "arguments": [{ "name": "topic", "description": "x", "type": "date" }]
    }));
    assert_eq!(
        error_path(&bad_type),
        "prompts.learning.learning_plan_prompt.arguments[0].type"
    );

    let bad_required = prompt_doc(json!({
        "name": "learning_plan_prompt",
        "description": "d",
        "template": "t",
        "arguments": [{ "name": "topic", "description": "x", "required": "yes" }]
    }));
    assert_eq!(
        error_path(&bad_required),
        "prompts.learning.learning_plan_prompt.arguments[0].required"
    );
}

#[test]
fn argument_default_must_be_scalar() {
    let document = prompt_doc(json!({
        "name": "learning_plan_prompt",
        "description": "d",
        "template": "t",
        "arguments": [{ "name": "topic", "description": "x", "default": ["a"] }]
    }));
    assert_eq!(
        error_path(&document),
        "prompts.learning.learning_plan_prompt.arguments[0].default"
    );
}

#[test]
fn duplicate_argument_names_are_rejected() {
    let document = prompt_doc(json!({
        "name": "learning_plan_prompt",
        "description": "d",
        "template": "{topic}",
        "arguments": [
            { "name": "topic", "description": "a" },
            { "name": "topic", "description": "b" }
        ]
    }));
    let err = validate(&document).expect_err("duplicate");
    assert_eq!(
        err.path,
        "prompts.learning.learning_plan_prompt.arguments[1].name"
    );
    assert!(err.message.contains("duplicate"));
}

#[test]
fn from_json_str_separates_parse_and_schema_errors() {
    let parse = ContentDocument::from_json_str("{ not json").expect_err("parse");
    assert!(matches!(parse, AppError::Parse(_)));

    let schema = ContentDocument::from_json_str(r#"{"tips": {"mcp": [1]}}"#).expect_err("schema");
    match schema {
        AppError::Schema(err) => assert_eq!(err.path, "tips.mcp[0]"),
        other => panic!("expected schema error, got {other}"),
    }
}

#[test]
fn document_preserves_declaration_order() {
    let raw = r#"{
        "tips": { "zeta": ["z"], "alpha": ["a"] },
        "prompts": {
            "planning": {
                "second": { "name": "second", "description": "d", "template": "t" },
                "first": { "name": "first", "description": "d", "template": "t" }
            },
            "development": {
                "only": { "name": "only", "description": "d", "template": "t" }
            }
        }
    }"#;
    let document = ContentDocument::from_json_str(raw).expect("valid");

    let tip_order: Vec<&str> = document.tips.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(tip_order, ["zeta", "alpha"]);

    let prompt_order: Vec<(&str, &str)> = document
        .prompts
        .iter()
        .flat_map(|(category, prompts)| {
            prompts
                .iter()
                .map(move |(key, _)| (category.as_str(), key.as_str()))
        })
        .collect();
    assert_eq!(
        prompt_order,
        [
            ("planning", "second"),
            ("planning", "first"),
            ("development", "only")
        ]
    );
}
