//! Hack platform model used to execute generated assembly
//!
//! `assemble` resolves labels and variables in assembly text; `Cpu` runs the
//! result against a RAM image.

pub mod assembler;
pub mod constants;
pub mod cpu;

pub use assembler::{assemble, Instr, Program};
pub use cpu::Cpu;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("line {line}: cannot parse '{text}'")]
    Syntax { line: usize, text: String },

    #[error("line {line}: constant {value} does not fit in 15 bits")]
    ConstantTooLarge { line: usize, value: String },

    #[error("line {line}: label '{label}' defined twice")]
    DuplicateLabel { line: usize, label: String },

    #[error("memory access at address {0} is outside RAM")]
    AddressOutOfRange(u16),

    #[error("program did not halt within {0} steps")]
    StepLimit(usize),
}
