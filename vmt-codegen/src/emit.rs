//! Emitter
//!
//! Generated code stays structured until this point. A `Block` holds the
//! output for one source instruction; the emitters concatenate blocks in
//! program order.

use crate::asm::AsmInst;
use serde::{Deserialize, Serialize};
use vmt_common::{SourceLocation, TranslateError};

/// Marker that starts every inline error comment
pub const ERROR_MARKER: &str = "ERROR";

/// The code generated for one source instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub location: SourceLocation,
    /// The instruction as written in the input
    pub source: String,
    pub body: Result<Vec<AsmInst>, TranslateError>,
}

impl Block {
    pub fn new(location: SourceLocation, source: impl Into<String>, body: Vec<AsmInst>) -> Self {
        Self {
            location,
            source: source.into(),
            body: Ok(body),
        }
    }

    pub fn failed(location: SourceLocation, source: impl Into<String>, err: TranslateError) -> Self {
        Self {
            location,
            source: source.into(),
            body: Err(err),
        }
    }

    pub fn is_error(&self) -> bool {
        self.body.is_err()
    }

    /// Generated instructions, empty for a failed block
    pub fn instructions(&self) -> &[AsmInst] {
        match &self.body {
            Ok(insts) => insts,
            Err(_) => &[],
        }
    }

    fn error_comment(&self) -> Option<AsmInst> {
        self.body
            .as_ref()
            .err()
            .map(|e| AsmInst::comment(format!("{} {}: {}", ERROR_MARKER, self.location, e)))
    }
}

/// Text emitter settings
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Prefix each block with a comment echoing its source instruction
    pub echo_source: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { echo_source: true }
    }
}

/// Render blocks as assembly text, one instruction per line
pub fn emit_text(blocks: &[Block], options: &EmitOptions) -> String {
    let mut output = String::new();
    for block in blocks {
        if options.echo_source {
            output.push_str(&AsmInst::comment(block.source.as_str()).to_string());
            output.push('\n');
        }
        if let Some(marker) = block.error_comment() {
            output.push_str(&marker.to_string());
            output.push('\n');
        }
        for inst in block.instructions() {
            output.push_str(&inst.to_string());
            output.push('\n');
        }
    }
    output
}

#[derive(Serialize)]
struct JsonBlock<'a> {
    location: &'a SourceLocation,
    source: &'a str,
    asm: Vec<String>,
    error: Option<String>,
}

/// Render blocks as a JSON listing
pub fn emit_json(blocks: &[Block]) -> Result<String, serde_json::Error> {
    let listing: Vec<JsonBlock<'_>> = blocks
        .iter()
        .map(|block| JsonBlock {
            location: &block.location,
            source: &block.source,
            asm: block.instructions().iter().map(|i| i.to_string()).collect(),
            error: block.body.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    serde_json::to_string_pretty(&listing)
}
