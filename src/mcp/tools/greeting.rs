//! `generate_greeting` tool.
//!
//! Picks one of the `messages.greetings` templates at random and fills in
//! the caller's name.

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::{CallToolResult, Content};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::content::schema::NAME_PLACEHOLDER;
use crate::mcp::handler::ContentServer;

/// Used when the content document declares no greetings.
pub const FALLBACK_GREETING: &str = "Hello {name}! Welcome to the MCP test server!";

#[derive(Debug, Deserialize)]
struct GreetingInput {
    name: Option<String>,
}

/// Substitute every `{name}` in `template`.
#[must_use]
pub fn render_greeting(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Select a template using `seed`; `None` when `templates` is empty.
#[must_use]
pub fn pick_template(templates: &[String], seed: u64) -> Option<&str> {
    if templates.is_empty() {
        return None;
    }
    let len = u64::try_from(templates.len()).ok()?;
    let index = usize::try_from(seed % len).ok()?;
    templates.get(index).map(String::as_str)
}

/// Greeting for `name` drawn at random from `templates`.
#[must_use]
pub fn generate_greeting(templates: &[String], name: &str) -> String {
    let (seed, _) = Uuid::new_v4().as_u64_pair();
    let template = pick_template(templates, seed).unwrap_or(FALLBACK_GREETING);
    render_greeting(template, name)
}

/// Handle the `generate_greeting` tool call.
///
/// # Errors
///
/// Returns `invalid_params` when `name` is not a string.
#[allow(clippy::unused_async)]
pub async fn handle(
    context: ToolCallContext<'_, ContentServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let server = context.service;
    let args = context.arguments.unwrap_or_default();
    let input: GreetingInput = serde_json::from_value(Value::Object(args)).map_err(|err| {
        rmcp::ErrorData::invalid_params(format!("invalid generate_greeting parameters: {err}"), None)
    })?;

    let name = input
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| server.config().default_greeting_name.clone());

    let catalog = server.catalog().snapshot();
    let greeting = generate_greeting(catalog.store().greetings(), &name);
    info!(%name, "generate_greeting");

    Ok(CallToolResult::success(vec![Content::text(greeting)]))
}
