//! Append-only diagnostic log shown under the chart.

use chrono::{DateTime, Local};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Load,
    Render,
    Watch,
    Export,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Load => "load",
            DiagnosticKind::Render => "render",
            DiagnosticKind::Watch => "watch",
            DiagnosticKind::Export => "export",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub at: DateTime<Local>,
    pub kind: DiagnosticKind,
    /// File the entry is about, if any.
    pub source: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, source: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        warn!(%kind, source = source.unwrap_or("-"), "{message}");
        self.entries.push(Diagnostic {
            at: Local::now(),
            kind,
            source: source.map(str::to_string),
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries raised for a particular file.
    pub fn for_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries
            .iter()
            .filter(move |d| d.source.as_deref() == Some(source))
    }
}
