//! Diagnostics collection for binding-model analysis.
//!
//! Not every inconsistency in a metadata snapshot should abort the analysis:
//! debug-only consistency checks (e.g. overload static-ness agreement) report
//! here instead of failing the run. The [`Diagnostics`] container uses
//! `boxcar::Vec` for lock-free append, so a shared container can collect
//! reports from independent analyses without synchronization.

use std::fmt;

/// Severity level of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Informational message
    Info,
    /// Suspicious but analyzable metadata
    Warning,
    /// Inconsistent metadata that a strict consumer should reject
    Error,
}

/// Which part of the analysis produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Type category classification
    Type,
    /// Method aggregation
    Method,
    /// Interface closure computation
    Interface,
    /// Property/event accessor resolution
    Accessor,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single diagnostic entry
pub struct Diagnostic {
    /// Severity of the finding
    pub severity: DiagnosticSeverity,
    /// Category of the producing analysis stage
    pub category: DiagnosticCategory,
    /// Human-readable description, naming the offending type/member
    pub message: String,
}

/// Thread-safe, append-only container for diagnostic entries.
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty container
    #[must_use]
    pub fn new() -> Self {
        Diagnostics {
            entries: boxcar::Vec::new(),
        }
    }

    /// Record an informational entry
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Info, category, message);
    }

    /// Record a warning entry
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Warning, category, message);
    }

    /// Record an error entry
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Error, category, message);
    }

    fn push(
        &self,
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            category,
            message: message.into(),
        });
    }

    /// Whether any error-severity entries were recorded
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.iter().any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Number of error-severity entries
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Total number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.count()
    }

    /// Whether the container is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all recorded entries
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, entry)| entry)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}
