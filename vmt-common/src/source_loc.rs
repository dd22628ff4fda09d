//! Source location tracking for diagnostics
//!
//! VM programs are line oriented, so a location is simply the translation
//! unit's name plus the physical line the instruction came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line in a translation unit (line is 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub unit: String,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(unit: &str, line: usize) -> Self {
        Self {
            unit: unit.to_string(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit, self.line)
    }
}
