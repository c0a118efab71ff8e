//! `get_learning_tips` and `list_tip_categories` tools.

use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::{CallToolResult, Content};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::content::ContentStore;
use crate::mcp::handler::ContentServer;

#[derive(Debug, Deserialize)]
struct TipsInput {
    category: Option<String>,
}

/// Tips for `category` (default category when `None`); empty if unknown.
#[must_use]
pub fn learning_tips(store: &ContentStore, category: Option<&str>) -> Vec<String> {
    store.tips(category).to_vec()
}

/// Tip category names in declaration order.
#[must_use]
pub fn tip_categories(store: &ContentStore) -> Vec<String> {
    store
        .tip_categories()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Handle the `get_learning_tips` tool call.
///
/// # Errors
///
/// Returns `invalid_params` when `category` is not a string.
#[allow(clippy::unused_async)]
pub async fn handle_learning_tips(
    context: ToolCallContext<'_, ContentServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let args = context.arguments.unwrap_or_default();
    let input: TipsInput = serde_json::from_value(Value::Object(args)).map_err(|err| {
        rmcp::ErrorData::invalid_params(format!("invalid get_learning_tips parameters: {err}"), None)
    })?;

    let catalog = context.service.catalog().snapshot();
    let tips = learning_tips(catalog.store(), input.category.as_deref());
    info!(category = ?input.category, count = tips.len(), "get_learning_tips");

    Ok(CallToolResult::success(vec![Content::json(tips)?]))
}

/// Handle the `list_tip_categories` tool call.
///
/// # Errors
///
/// Only fails if the result cannot be serialized.
#[allow(clippy::unused_async)]
pub async fn handle_categories(
    context: ToolCallContext<'_, ContentServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let catalog = context.service.catalog().snapshot();
    let categories = tip_categories(catalog.store());
    Ok(CallToolResult::success(vec![Content::json(categories)?]))
}
