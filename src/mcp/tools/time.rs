//! `get_current_time` and `calculate_days_until_date` tools.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rmcp::handler::server::tool::ToolCallContext;
use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::mcp::handler::ContentServer;

/// Timestamp layout returned by `get_current_time`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date layout accepted by `calculate_days_until_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returned in place of a result when the target date does not parse.
pub const INVALID_DATE_MESSAGE: &str =
    "Invalid date format. Please use YYYY-MM-DD format (e.g., 2024-12-25)";

/// Result of `calculate_days_until_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaysUntil {
    /// Date as supplied by the caller.
    pub target_date: String,
    /// Today's date.
    pub current_date: String,
    /// Whole days from today to the target (negative when past).
    pub days_difference: i64,
    /// Human-readable summary.
    pub message: String,
    /// Target lies after today.
    pub is_future: bool,
    /// Target lies before today.
    pub is_past: bool,
    /// Target is today.
    pub is_today: bool,
}

#[derive(Debug, Deserialize)]
struct DaysUntilInput {
    target_date: String,
}

/// Format `now` as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Compare `target_date` (`YYYY-MM-DD`) against `today` by calendar date.
///
/// Returns `None` when `target_date` does not parse.
#[must_use]
pub fn days_until(target_date: &str, today: NaiveDate) -> Option<DaysUntil> {
    let target = NaiveDate::parse_from_str(target_date, DATE_FORMAT).ok()?;
    let days = target.signed_duration_since(today).num_days();

    let message = match days {
        d if d > 0 => format!("{d} days until {target_date}"),
        d if d < 0 => format!("{target_date} was {} days ago", d.unsigned_abs()),
        _ => format!("{target_date} is today!"),
    };

    Some(DaysUntil {
        target_date: target_date.to_owned(),
        current_date: today.format(DATE_FORMAT).to_string(),
        days_difference: days,
        message,
        is_future: days > 0,
        is_past: days < 0,
        is_today: days == 0,
    })
}

/// JSON payload for `calculate_days_until_date`, including the error shape.
#[must_use]
pub fn days_until_payload(target_date: &str, today: NaiveDate) -> Value {
    match days_until(target_date, today) {
        Some(result) => serde_json::to_value(result)
            .unwrap_or_else(|err| serde_json::json!({ "error": err.to_string() })),
        None => serde_json::json!({ "error": INVALID_DATE_MESSAGE }),
    }
}

/// Handle the `get_current_time` tool call.
///
/// # Errors
///
/// Never fails; the signature matches the tool router.
#[allow(clippy::unused_async, clippy::unnecessary_wraps)]
pub async fn handle_current_time(
    _context: ToolCallContext<'_, ContentServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let now = format_timestamp(Local::now().naive_local());
    info!(%now, "get_current_time");
    Ok(CallToolResult::success(vec![Content::text(now)]))
}

/// Handle the `calculate_days_until_date` tool call.
///
/// # Errors
///
/// Returns `invalid_params` when `target_date` is missing. A malformed
/// date is reported inside the result payload instead.
#[allow(clippy::unused_async)]
pub async fn handle_days_until(
    context: ToolCallContext<'_, ContentServer>,
) -> Result<CallToolResult, rmcp::ErrorData> {
    let args = context.arguments.unwrap_or_default();
    let input: DaysUntilInput = serde_json::from_value(Value::Object(args)).map_err(|err| {
        rmcp::ErrorData::invalid_params(
            format!("invalid calculate_days_until_date parameters: {err}"),
            None,
        )
    })?;

    let payload = days_until_payload(&input.target_date, Local::now().date_naive());
    Ok(CallToolResult::success(vec![Content::json(payload)?]))
}
