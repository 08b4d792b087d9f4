//! Diagnostics sink for manifest validation
//!
//! Field rules report findings through a sink instead of returning them, so a
//! single load can surface every problem in one pass. Provides:
//! - Diagnostics trait: warning/error reporting interface
//! - ConsoleDiagnostics: stderr reporting for interactive use
//! - RecordingDiagnostics: in-memory capture for tests

use std::sync::Mutex;

/// Severity of a reported condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Value is unusual; a safe default or absence was substituted
    Warning,
    /// Value is invalid; the field was left absent or null
    Error,
}

/// A single recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the condition
    pub severity: Severity,
    /// Human-readable, single-line message
    pub message: String,
}

/// Sink for warnings and errors emitted during validation
///
/// Calls are fire-and-forget; implementations must not fail and must not
/// interrupt the caller.
pub trait Diagnostics: Send + Sync {
    /// Report a warning-severity condition
    fn warning(&self, message: &str);

    /// Report an error-severity condition
    fn error(&self, message: &str);
}

/// Diagnostics sink that writes single lines to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn warning(&self, message: &str) {
        eprintln!("warning: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Diagnostics sink that records every report for later inspection
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded diagnostics, in report order
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages of all warning-severity reports
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    /// Messages of all error-severity reports
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    /// True if nothing has been reported
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Discard everything recorded so far
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }

    fn record(&self, severity: Severity, message: &str) {
        self.entries.lock().unwrap().push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warning(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }
}
