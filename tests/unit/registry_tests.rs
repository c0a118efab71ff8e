//! Unit tests for prompt registration and the in-process prompt catalog.

use content_mcp::content::defaults::builtin_document;
use content_mcp::content::document::ArgumentSpec;
use content_mcp::content::{ContentDocument, ContentStore};
use content_mcp::prompts::{register_all, CallArguments, CompiledPrompt, PromptCatalog, PromptSink};
use content_mcp::{AppError, Result};
use serde_json::json;

/// Records every binding it receives.
#[derive(Default)]
struct RecordingSink {
    bound: Vec<(String, String, usize)>,
}

impl PromptSink for RecordingSink {
    fn bind(
        &mut self,
        external_name: &str,
        description: &str,
        arguments: &[ArgumentSpec],
        _callable: CompiledPrompt,
    ) -> Result<()> {
        self.bound
            .push((external_name.to_owned(), description.to_owned(), arguments.len()));
        Ok(())
    }
}

/// Refuses the second binding.
#[derive(Default)]
struct RefusingSink {
    calls: usize,
}

impl PromptSink for RefusingSink {
    fn bind(
        &mut self,
        external_name: &str,
        _description: &str,
        _arguments: &[ArgumentSpec],
        _callable: CompiledPrompt,
    ) -> Result<()> {
        self.calls += 1;
        if self.calls == 2 {
            return Err(AppError::Mcp(format!("host refused {external_name}")));
        }
        Ok(())
    }
}

fn store(raw: serde_json::Value) -> ContentStore {
    ContentStore::new(ContentDocument::from_value(&raw).expect("valid document"))
}

fn prompt(name: &str) -> serde_json::Value {
    json!({ "name": name, "description": format!("{name} description"), "template": "t" })
}

#[test]
fn registers_builtin_prompts_in_document_order() {
    let store = ContentStore::new(builtin_document().expect("built-in"));
    let mut sink = RecordingSink::default();

    let count = register_all(&store, &mut sink).expect("registration succeeds");

    assert_eq!(count, 5);
    let names: Vec<&str> = sink.bound.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(
        names,
        [
            "development_code_review_prompt",
            "development_mcp_development_prompt",
            "learning_learning_plan_prompt",
            "learning_debugging_assistant_prompt",
            "planning_project_planning_prompt",
        ]
    );
    assert_eq!(sink.bound[2].2, 3, "learning plan declares three arguments");
}

#[test]
fn colliding_external_names_register_nothing() {
    let store = store(json!({
        "prompts": {
            "a_b": { "c": prompt("c") },
            "a": { "b_c": prompt("b_c") }
        }
    }));
    let mut sink = RecordingSink::default();

    let err = register_all(&store, &mut sink).expect_err("a_b_c collides");

    match err {
        AppError::DuplicatePrompt(name) => assert_eq!(name, "a_b_c"),
        other => panic!("expected duplicate prompt error, got {other}"),
    }
    assert!(sink.bound.is_empty(), "no partial registration");
}

#[test]
fn external_name_uses_map_key_not_inner_name() {
    let store = store(json!({
        "prompts": { "learning": { "plan": prompt("something_else") } }
    }));
    let catalog = PromptCatalog::from_store(&store).expect("registers");
    assert_eq!(catalog.names(), ["learning_plan"]);
}

#[test]
fn sink_errors_propagate() {
    let store = ContentStore::new(builtin_document().expect("built-in"));
    let mut sink = RefusingSink::default();
    let err = register_all(&store, &mut sink).expect_err("second bind fails");
    assert!(err.to_string().starts_with("mcp: host refused"));
}

#[test]
fn empty_document_registers_nothing() {
    let catalog = PromptCatalog::from_store(&store(json!({}))).expect("registers");
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
}

#[test]
fn catalog_call_dispatches_by_name() {
    let catalog =
        PromptCatalog::from_store(&ContentStore::new(builtin_document().expect("built-in")))
            .expect("registers");

    let mut arguments = CallArguments::new();
    arguments.insert("topic".into(), json!("Rust"));
    let messages = catalog
        .call("learning_learning_plan_prompt", &arguments)
        .expect("renders");
    assert!(messages[0].content.contains("Rust"));
    assert!(messages[0].content.contains("beginner"));

    let missing = catalog
        .call("learning_nope", &arguments)
        .expect_err("unknown prompt");
    assert!(matches!(missing, AppError::NotFound(_)));

    let bad = catalog
        .call("learning_learning_plan_prompt", &CallArguments::new())
        .expect_err("topic missing");
    assert!(matches!(bad, AppError::Prompt(_)));
}

#[test]
fn catalog_iterates_in_registration_order() {
    let catalog =
        PromptCatalog::from_store(&ContentStore::new(builtin_document().expect("built-in")))
            .expect("registers");
    let from_iter: Vec<&str> = (&catalog)
        .into_iter()
        .map(CompiledPrompt::external_name)
        .collect();
    assert_eq!(from_iter, catalog.names());
    assert!(catalog.get("planning_project_planning_prompt").is_some());
}
