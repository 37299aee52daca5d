//! Selection Diff Tracker.
//!
//! Selections are full snapshots, so a file that is selected and deselected
//! between two observations is never seen. Callers must report snapshots
//! often enough for that not to matter.

use super::FileId;
use std::collections::BTreeSet;

/// Identifiers that entered and left the selection between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    pub added: BTreeSet<FileId>,
    pub removed: BTreeSet<FileId>,
}

impl SelectionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// `added = current - previous`, `removed = previous - current`.
pub fn diff(previous: &BTreeSet<FileId>, current: &BTreeSet<FileId>) -> SelectionDiff {
    SelectionDiff {
        added: current.difference(previous).cloned().collect(),
        removed: previous.difference(current).cloned().collect(),
    }
}

/// Keeps the last observed snapshot as the baseline for the next diff.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    previous: BTreeSet<FileId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> &BTreeSet<FileId> {
        &self.previous
    }

    /// Diff against the stored baseline and adopt `current` as the new one.
    pub fn observe(&mut self, current: BTreeSet<FileId>) -> SelectionDiff {
        let changes = diff(&self.previous, &current);
        self.previous = current;
        changes
    }
}
