//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{json, Value};

/// A small valid document with one tip category and one prompt.
pub fn sample_document(tip: &str) -> Value {
    json!({
        "tips": { "mcp": [tip] },
        "messages": { "greetings": ["Hello {name}!"] },
        "prompts": {
            "learning": {
                "learning_plan_prompt": {
                    "name": "learning_plan_prompt",
                    "description": "Plan",
                    "template": "Learn {topic}",
                    "arguments": [{ "name": "topic", "description": "t", "required": true }]
                }
            }
        }
    })
}

/// Write `document` to `dir/content.json` and return the path.
pub fn write_document(dir: &Path, document: &Value) -> PathBuf {
    let path = dir.join("content.json");
    std::fs::write(&path, serde_json::to_vec_pretty(document).expect("serialize"))
        .expect("write content");
    path
}

/// Poll `check` until it returns `true` or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check()
}
