//! Compiled-in fallback content.
//!
//! Used only when neither a `--json-file` argument nor the content path
//! environment variable is present.

use super::document::ContentDocument;
use crate::Result;

/// Raw JSON of the built-in document.
pub const BUILTIN_CONTENT: &str = include_str!("../../data/content.json");

/// Parse and validate the built-in document.
///
/// # Errors
///
/// Only fails if the embedded JSON is broken, which the test suite guards
/// against.
pub fn builtin_document() -> Result<ContentDocument> {
    ContentDocument::from_json_str(BUILTIN_CONTENT)
}
