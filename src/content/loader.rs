//! Loads a content document from its resolved source.

use std::fs;
use std::io::ErrorKind;

use tracing::{info, warn};

use super::defaults::builtin_document;
use super::document::ContentDocument;
use crate::config::ContentSource;
use crate::{AppError, Result};

/// Read, parse and validate the document behind `source`.
///
/// A configured path that is missing or unreadable is an error; only
/// [`ContentSource::BuiltIn`] falls back to the compiled-in content.
///
/// # Errors
///
/// Returns `AppError::Io` when the file cannot be read, `AppError::Parse`
/// for malformed JSON and `AppError::Schema` for schema violations.
pub fn load_document(source: &ContentSource) -> Result<ContentDocument> {
    let Some(path) = source.path() else {
        warn!("no content file given via --json-file or environment; using built-in content");
        return builtin_document();
    };

    let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => {
            AppError::Io(format!("content file not found: {}", path.display()))
        }
        _ => AppError::Io(format!(
            "failed to read content file {}: {err}",
            path.display()
        )),
    })?;

    let document = ContentDocument::from_json_str(&raw)?;
    info!(%source, "content loaded");
    Ok(document)
}
