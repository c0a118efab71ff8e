//! Hot reload of the content document.
//!
//! [`ContentWatcher`] watches the directory holding the content file and,
//! on any create/modify/remove event touching that file, rebuilds the
//! catalog through [`SharedCatalog::reload`]. A broken edit is logged and
//! the previous catalog keeps serving.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::catalog::SharedCatalog;
use crate::config::{ContentSource, ServerConfig};
use crate::{AppError, Result};

/// Returns `true` for events that may have changed `file_name`.
pub(crate) fn touches_content_file(event: &Event, file_name: &OsStr) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|path| path.file_name() == Some(file_name))
}

/// Keeps a `notify` watcher alive; dropping it stops reloading.
pub struct ContentWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ContentWatcher {
    /// Start watching the file behind `source`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `source` is the built-in document, or
    /// `AppError::Io` if the OS watcher cannot be created.
    pub fn new(
        source: ContentSource,
        catalog: SharedCatalog,
        config: Arc<ServerConfig>,
    ) -> Result<Self> {
        let path = source
            .path()
            .map(Path::to_path_buf)
            .ok_or_else(|| AppError::Config("built-in content cannot be watched".into()))?;
        let file_name = path
            .file_name()
            .map(ToOwned::to_owned)
            .ok_or_else(|| AppError::Config(format!("not a file path: {}", path.display())))?;

        let mut watcher = notify::recommended_watcher(
            move |result: std::result::Result<Event, notify::Error>| match result {
                Ok(event) if touches_content_file(&event, &file_name) => {
                    match catalog.reload(&source, &config) {
                        Ok(()) => info!(%source, "content reloaded"),
                        Err(err) => {
                            warn!(%err, %source, "content reload failed; keeping previous content");
                        }
                    }
                }
                Err(err) => warn!(%err, "content file watcher error"),
                _ => {}
            },
        )
        .map_err(|err| AppError::Io(format!("failed to create content watcher: {err}")))?;

        // Watching the directory also catches editors that save via rename.
        let watch_target = path
            .parent()
            .filter(|parent| parent != &Path::new(""))
            .unwrap_or(Path::new("."));

        watcher
            .watch(watch_target, RecursiveMode::NonRecursive)
            .map_err(|err| {
                AppError::Io(format!(
                    "failed to watch '{}': {err}",
                    watch_target.display()
                ))
            })?;

        info!(path = %path.display(), "content watcher started");

        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    /// The watched content file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
