//! Error handling for the Hack VM translator
//!
//! Nothing in the translator aborts a whole unit. Each instruction that cannot
//! be lowered produces a `TranslateError`, which is rendered inline in the
//! output and recorded as a `Diagnostic` for callers that want to inspect it.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Everything that can go wrong while translating a single VM instruction
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslateError {
    #[error("unknown command '{keyword}'")]
    UnknownCommand { keyword: String },

    #[error("unsupported {command} segment '{segment}'")]
    UnsupportedSegment { command: String, segment: String },

    #[error("cannot pop into the constant segment")]
    PopConstant,

    #[error("'{command}' expects {expected} operand(s), found {found}")]
    WrongOperandCount {
        command: String,
        expected: usize,
        found: usize,
    },

    #[error("'{value}' is not a valid non-negative index")]
    InvalidIndex { value: String },

    #[error("{segment} index {index} is out of range (maximum {max})")]
    IndexOutOfRange { segment: String, index: u16, max: u16 },

    #[error("'{name}' is not a valid symbol name")]
    InvalidName { name: String },
}

/// Broad classes of translation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The leading keyword is not a VM command
    UnknownCommand,
    /// A known command named a segment or operand it does not support
    UnsupportedOperand,
    /// Wrong operand count or an operand that does not parse
    Malformed,
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            TranslateError::UnsupportedSegment { .. }
            | TranslateError::PopConstant
            | TranslateError::IndexOutOfRange { .. } => ErrorKind::UnsupportedOperand,
            TranslateError::WrongOperandCount { .. }
            | TranslateError::InvalidIndex { .. }
            | TranslateError::InvalidName { .. } => ErrorKind::Malformed,
        }
    }

    pub fn unknown_command(keyword: &str) -> Self {
        TranslateError::UnknownCommand {
            keyword: keyword.to_string(),
        }
    }

    pub fn wrong_operand_count(command: &str, expected: usize, found: usize) -> Self {
        TranslateError::WrongOperandCount {
            command: command.to_string(),
            expected,
            found,
        }
    }
}

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message attached to a line of a translation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message,
        }
    }

    pub fn warning(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message,
        }
    }

    pub fn from_error(err: &TranslateError, location: SourceLocation) -> Self {
        Self::error(err.to_string(), location)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.location, self.message)
    }
}

/// Collects the diagnostics produced while translating one input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record a translation error at the given location
    pub fn error(&mut self, err: &TranslateError, location: SourceLocation) {
        self.push(Diagnostic::from_error(err, location));
    }

    pub fn warning(&mut self, message: String, location: SourceLocation) {
        self.push(Diagnostic::warning(message, location));
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Merge another log into this one, preserving order
    pub fn extend(&mut self, other: DiagnosticLog) {
        for diagnostic in other.diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}
