//! Unit tests for the `{placeholder}` template engine.

use content_mcp::errors::PromptError;
use content_mcp::prompts::template::{placeholders, render};

fn lookup(name: &str) -> Option<String> {
    match name {
        "topic" => Some("Rust".to_owned()),
        "level" => Some("beginner".to_owned()),
        _ => None,
    }
}

#[test]
fn substitutes_every_occurrence() {
    let rendered = render("{topic} for a {level}; more {topic}", lookup).expect("renders");
    assert_eq!(rendered, "Rust for a beginner; more Rust");
}

#[test]
fn double_braces_escape() {
    let rendered = render("{{topic}} is {topic}", lookup).expect("renders");
    assert_eq!(rendered, "{topic} is Rust");
}

#[test]
fn non_identifier_braces_are_literal() {
    let rendered = render("json: {\"a\": 1} {not valid} {topic}", lookup).expect("renders");
    assert_eq!(rendered, "json: {\"a\": 1} {not valid} Rust");
}

#[test]
fn unmatched_braces_are_literal() {
    assert_eq!(render("a { b", lookup).expect("renders"), "a { b");
    assert_eq!(render("a } b", lookup).expect("renders"), "a } b");
    assert_eq!(render("tail {topic", lookup).expect("renders"), "tail {topic");
}

#[test]
fn unresolved_placeholder_fails() {
    let err = render("Plan for {goal}", lookup).expect_err("goal is unknown");
    assert_eq!(
        err,
        PromptError::TemplateRender {
            placeholder: "goal".into()
        }
    );
}

#[test]
fn placeholders_are_unique_and_ordered() {
    assert_eq!(
        placeholders("{b} {a} {b} {{c}} {not one}"),
        ["b", "a"]
    );
}
