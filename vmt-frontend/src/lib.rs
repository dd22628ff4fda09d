//! Hack VM Translator - Frontend
//!
//! Turns VM source text into typed instructions:
//!
//! - `normalizer` strips comments and blank lines, keeping line numbers
//! - `instruction` defines the closed set of VM instructions
//! - `parser` maps each normalized line to a `VmInstruction`

pub mod instruction;
pub mod normalizer;
pub mod parser;

pub use instruction::{ArithmeticOp, Segment, VmInstruction};
pub use normalizer::{normalize, SourceLine};
pub use parser::{parse_line, parse_program, ParsedLine};
