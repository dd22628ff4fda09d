//! Hack VM Translator - Code Generation Output
//!
//! This crate owns the structured form of generated code and its rendering:
//!
//! - `asm`: the Hack assembly instruction model (address and compute
//!   instructions, labels, comments)
//! - `emit`: per-source-line blocks and the text/JSON emitters

pub mod asm;
pub mod emit;

pub use asm::{Address, AsmInst, Comp, Dest, Jump};
pub use emit::{emit_json, emit_text, Block, EmitOptions};
