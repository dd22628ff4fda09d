//! Hack VM Translator - Common Types and Diagnostics
//!
//! This crate contains the error taxonomy, diagnostic collection and source
//! location types shared by every phase of the translator.

pub mod error;
pub mod source_loc;

pub use error::{Diagnostic, DiagnosticLog, ErrorKind, Severity, TranslateError};
pub use source_loc::SourceLocation;
