//! Folder Watcher
//! Polls a directory on a fixed interval and reports its complete file list.
//!
//! Only full snapshots are reported. A file created and deleted between two
//! polls is never seen, so the interval must stay short compared to how fast
//! users change the folder.

use crate::viz::{DiagnosticKind, DiagnosticLog, FileId};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lists the regular, non-hidden files of `dir` by name.
pub fn list_files(dir: &Path) -> Result<BTreeSet<FileId>, WatchError> {
    if !dir.is_dir() {
        return Err(WatchError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| WatchError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = BTreeSet::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| WatchError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        files.insert(name.to_string());
    }

    Ok(files)
}

pub struct FolderWatcher {
    dir: PathBuf,
    interval: Duration,
    last_poll: Option<Instant>,
    last_error: Option<String>,
}

impl FolderWatcher {
    pub fn new(dir: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            dir: dir.into(),
            interval,
            last_poll: None,
            last_error: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Point at another directory; the next poll runs immediately.
    pub fn set_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dir = dir.into();
        self.last_poll = None;
        self.last_error = None;
    }

    pub fn poll_due(&self, now: Instant) -> bool {
        self.last_poll
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Scan the folder if the interval has elapsed.
    ///
    /// Failures are treated as an empty folder. Each distinct failure is
    /// logged once until a scan succeeds again.
    pub fn poll(&mut self, now: Instant, log: &mut DiagnosticLog) -> Option<BTreeSet<FileId>> {
        if !self.poll_due(now) {
            return None;
        }
        self.last_poll = Some(now);

        match list_files(&self.dir) {
            Ok(files) => {
                trace!(dir = %self.dir.display(), files = files.len(), "folder polled");
                self.last_error = None;
                Some(files)
            }
            Err(err) => {
                let message = err.to_string();
                if self.last_error.as_deref() != Some(message.as_str()) {
                    log.push(DiagnosticKind::Watch, None, message.clone());
                    self.last_error = Some(message);
                }
                Some(BTreeSet::new())
            }
        }
    }
}
