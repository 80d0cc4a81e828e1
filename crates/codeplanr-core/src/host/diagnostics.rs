//! Editor diagnostics (compiler/linter problems per file).

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// A single problem reported for a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based line number
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, line: u32, message: impl Into<String>) -> Self {
        Self {
            severity,
            line,
            message: message.into(),
        }
    }
}

/// Source of diagnostics for files in the workspace.
pub trait EditorDiagnostics: Send + Sync {
    fn for_file(&self, path: &Path) -> Vec<Diagnostic>;
}

/// Diagnostics registered by hand, keyed by absolute path.
///
/// Without an attached editor this reports no problems, which is what the
/// CLI uses.
#[derive(Debug, Default)]
pub struct InMemoryDiagnostics {
    entries: RwLock<HashMap<PathBuf, Vec<Diagnostic>>>,
}

impl InMemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the diagnostics recorded for `path`.
    pub fn set(&self, path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(path.into(), diagnostics);
        }
    }

    /// Drops all recorded diagnostics.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl EditorDiagnostics for InMemoryDiagnostics {
    fn for_file(&self, path: &Path) -> Vec<Diagnostic> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(path).cloned())
            .unwrap_or_default()
    }
}
