//! Instruction parser
//!
//! Splits a normalized line into a keyword and operands and dispatches on the
//! keyword. A bad line yields a `TranslateError` for that line only; the
//! program as a whole always parses.

use crate::instruction::{ArithmeticOp, Segment, VmInstruction};
use crate::normalizer::{normalize, SourceLine};
use log::trace;
use serde::{Deserialize, Serialize};
use vmt_common::TranslateError;

/// One normalized line and the outcome of parsing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub line: usize,
    pub text: String,
    pub result: Result<VmInstruction, TranslateError>,
}

/// Normalize and parse a whole VM source text
pub fn parse_program(source: &str) -> Vec<ParsedLine> {
    normalize(source)
        .into_iter()
        .map(|SourceLine { line, text }| {
            let result = parse_line(&text);
            if let Err(e) = &result {
                trace!("line {}: {}", line, e);
            }
            ParsedLine { line, text, result }
        })
        .collect()
}

/// Parse a single comment-free line
pub fn parse_line(line: &str) -> Result<VmInstruction, TranslateError> {
    let inst = parse_operands(line)?;
    inst.check_bounds()?;
    Ok(inst)
}

fn parse_operands(line: &str) -> Result<VmInstruction, TranslateError> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().unwrap_or("");
    let operands: Vec<&str> = tokens.collect();

    match keyword {
        "push" => {
            let (segment, index) = segment_operands(keyword, &operands)?;
            Ok(VmInstruction::Push { segment, index })
        }
        "pop" => {
            let (segment, index) = segment_operands(keyword, &operands)?;
            if segment == Segment::Constant {
                return Err(TranslateError::PopConstant);
            }
            Ok(VmInstruction::Pop { segment, index })
        }
        "label" => Ok(VmInstruction::Label(name_operand(keyword, &operands)?)),
        "goto" => Ok(VmInstruction::Goto(name_operand(keyword, &operands)?)),
        "if-goto" => Ok(VmInstruction::IfGoto(name_operand(keyword, &operands)?)),
        "function" => {
            let (name, locals) = name_count_operands(keyword, &operands)?;
            Ok(VmInstruction::Function { name, locals })
        }
        "call" => {
            let (name, args) = name_count_operands(keyword, &operands)?;
            Ok(VmInstruction::Call { name, args })
        }
        "return" => {
            expect_operands(keyword, &operands, 0)?;
            Ok(VmInstruction::Return)
        }
        _ => match ArithmeticOp::from_keyword(keyword) {
            Some(op) => {
                expect_operands(keyword, &operands, 0)?;
                Ok(VmInstruction::Arithmetic(op))
            }
            None => Err(TranslateError::unknown_command(keyword)),
        },
    }
}

fn expect_operands(command: &str, operands: &[&str], expected: usize) -> Result<(), TranslateError> {
    if operands.len() != expected {
        return Err(TranslateError::wrong_operand_count(command, expected, operands.len()));
    }
    Ok(())
}

fn segment_operands(command: &str, operands: &[&str]) -> Result<(Segment, u16), TranslateError> {
    expect_operands(command, operands, 2)?;
    let segment = Segment::from_keyword(operands[0]).ok_or_else(|| {
        TranslateError::UnsupportedSegment {
            command: command.to_string(),
            segment: operands[0].to_string(),
        }
    })?;
    let index = parse_index(operands[1])?;
    Ok((segment, index))
}

fn name_operand(command: &str, operands: &[&str]) -> Result<String, TranslateError> {
    expect_operands(command, operands, 1)?;
    validate_name(operands[0])
}

fn name_count_operands(command: &str, operands: &[&str]) -> Result<(String, u16), TranslateError> {
    expect_operands(command, operands, 2)?;
    let name = validate_name(operands[0])?;
    let count = parse_index(operands[1])?;
    Ok((name, count))
}

fn parse_index(value: &str) -> Result<u16, TranslateError> {
    // u16::from_str accepts a leading '+', which the VM language does not
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TranslateError::InvalidIndex { value: value.to_string() });
    }
    value
        .parse::<u16>()
        .map_err(|_| TranslateError::InvalidIndex { value: value.to_string() })
}

/// Symbols may use letters, digits, `_`, `.`, `$` and `:`, but not start with a digit
fn validate_name(name: &str) -> Result<String, TranslateError> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':');
    let starts_ok = name.chars().next().is_some_and(|c| !c.is_ascii_digit());
    if !starts_ok || !name.chars().all(valid_char) {
        return Err(TranslateError::InvalidName { name: name.to_string() });
    }
    Ok(name.to_string())
}
