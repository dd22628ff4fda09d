//! VM instruction definitions
//!
//! The VM language is a closed set of seventeen commands. Each parsed line
//! becomes exactly one `VmInstruction`, which the backend matches
//! exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use vmt_common::TranslateError;

/// Number of cells in the temp segment
pub const TEMP_SIZE: u16 = 8;

/// Largest value an address instruction can load as an immediate
pub const MAX_CONSTANT: u16 = 0x7FFF;

/// Cells a call site pushes between the arguments and the callee's locals
pub const CALL_FRAME_SIZE: u16 = 5;

/// `call` computes ARG as SP - (nArgs + frame), and that offset is loaded as an immediate
pub const MAX_CALL_ARGS: u16 = MAX_CONSTANT - CALL_FRAME_SIZE;

/// VM memory segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Constant,
    Static,
    Local,
    Argument,
    This,
    That,
    Temp,
    /// Two cells aliasing the this/that base pointers
    Pointer,
}

impl Segment {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "constant" => Some(Segment::Constant),
            "static" => Some(Segment::Static),
            "local" => Some(Segment::Local),
            "argument" => Some(Segment::Argument),
            "this" => Some(Segment::This),
            "that" => Some(Segment::That),
            "temp" => Some(Segment::Temp),
            "pointer" => Some(Segment::Pointer),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Static => "static",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
        }
    }

    /// Highest valid index, for segments with a fixed size
    pub fn max_index(&self) -> Option<u16> {
        match self {
            Segment::Constant => Some(MAX_CONSTANT),
            Segment::Temp => Some(TEMP_SIZE - 1),
            Segment::Pointer => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Stack arithmetic, bitwise and comparison commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "add" => Some(ArithmeticOp::Add),
            "sub" => Some(ArithmeticOp::Sub),
            "neg" => Some(ArithmeticOp::Neg),
            "eq" => Some(ArithmeticOp::Eq),
            "gt" => Some(ArithmeticOp::Gt),
            "lt" => Some(ArithmeticOp::Lt),
            "and" => Some(ArithmeticOp::And),
            "or" => Some(ArithmeticOp::Or),
            "not" => Some(ArithmeticOp::Not),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }

    /// Number of stack operands consumed
    pub fn arity(&self) -> usize {
        match self {
            ArithmeticOp::Neg | ArithmeticOp::Not => 1,
            _ => 2,
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt)
    }
}

/// A parsed VM instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmInstruction {
    Push { segment: Segment, index: u16 },
    Pop { segment: Segment, index: u16 },
    Arithmetic(ArithmeticOp),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function { name: String, locals: u16 },
    Call { name: String, args: u16 },
    Return,
}

impl VmInstruction {
    /// Reject operands the target cannot represent
    pub fn check_bounds(&self) -> Result<(), TranslateError> {
        match self {
            VmInstruction::Push { segment, index } | VmInstruction::Pop { segment, index } => {
                match segment.max_index() {
                    Some(max) if *index > max => Err(TranslateError::IndexOutOfRange {
                        segment: segment.keyword().to_string(),
                        index: *index,
                        max,
                    }),
                    _ => Ok(()),
                }
            }
            VmInstruction::Call { args, .. } if *args > MAX_CALL_ARGS => Err(TranslateError::IndexOutOfRange {
                segment: "call".to_string(),
                index: *args,
                max: MAX_CALL_ARGS,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for VmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmInstruction::Push { segment, index } => write!(f, "push {} {}", segment, index),
            VmInstruction::Pop { segment, index } => write!(f, "pop {} {}", segment, index),
            VmInstruction::Arithmetic(op) => f.write_str(op.keyword()),
            VmInstruction::Label(name) => write!(f, "label {}", name),
            VmInstruction::Goto(name) => write!(f, "goto {}", name),
            VmInstruction::IfGoto(name) => write!(f, "if-goto {}", name),
            VmInstruction::Function { name, locals } => write!(f, "function {} {}", name, locals),
            VmInstruction::Call { name, args } => write!(f, "call {} {}", name, args),
            VmInstruction::Return => f.write_str("return"),
        }
    }
}
