//! Contract tests for the advertised tool surface.

use content_mcp::mcp::handler::ContentServer;

#[test]
fn exposes_exactly_the_simple_tools() {
    let names: Vec<String> = ContentServer::all_tools()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    assert_eq!(
        names,
        [
            "get_current_time",
            "calculate_days_until_date",
            "generate_greeting",
            "get_learning_tips",
            "list_tip_categories",
        ]
    );
}

#[test]
fn every_tool_has_object_schema_and_description() {
    for tool in ContentServer::all_tools() {
        assert_eq!(
            tool.input_schema.get("type").and_then(|v| v.as_str()),
            Some("object"),
            "tool {} schema type",
            tool.name
        );
        assert!(tool.description.is_some(), "tool {} description", tool.name);
    }
}

#[test]
fn days_until_requires_target_date() {
    let tool = ContentServer::all_tools()
        .into_iter()
        .find(|tool| tool.name == "calculate_days_until_date")
        .expect("tool present");
    let required = tool.input_schema.get("required").expect("required list");
    assert_eq!(required, &serde_json::json!(["target_date"]));
}

#[test]
fn optional_tool_arguments_are_not_required() {
    for name in ["generate_greeting", "get_learning_tips"] {
        let tool = ContentServer::all_tools()
            .into_iter()
            .find(|tool| tool.name == name)
            .expect("tool present");
        assert!(tool.input_schema.get("required").is_none(), "{name}");
    }
}
