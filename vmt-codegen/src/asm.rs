//! Hack Assembly Instruction Definitions
//!
//! The Hack machine has two registers (A and D), a memory operand M that
//! always means RAM[A], and two instruction kinds: address loads (`@value`)
//! and compute instructions (`dest=comp;jump`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand of an address instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Address {
    Constant(u16),
    Symbol(String),
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Constant(value) => write!(f, "{}", value),
            Address::Symbol(name) => f.write_str(name),
        }
    }
}

/// Registers written by a compute instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dest {
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    pub const ALL: [Dest; 7] = [Dest::M, Dest::D, Dest::MD, Dest::A, Dest::AM, Dest::AD, Dest::AMD];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Dest::M => "M",
            Dest::D => "D",
            Dest::MD => "MD",
            Dest::A => "A",
            Dest::AM => "AM",
            Dest::AD => "AD",
            Dest::AMD => "AMD",
        }
    }

    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.mnemonic() == s)
    }

    pub fn writes_a(&self) -> bool {
        matches!(self, Dest::A | Dest::AM | Dest::AD | Dest::AMD)
    }

    pub fn writes_d(&self) -> bool {
        matches!(self, Dest::D | Dest::MD | Dest::AD | Dest::AMD)
    }

    pub fn writes_m(&self) -> bool {
        matches!(self, Dest::M | Dest::MD | Dest::AM | Dest::AMD)
    }
}

/// ALU computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comp {
    Zero,
    One,
    NegOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

impl Comp {
    pub const ALL: [Comp; 28] = [
        Comp::Zero, Comp::One, Comp::NegOne,
        Comp::D, Comp::A, Comp::M,
        Comp::NotD, Comp::NotA, Comp::NotM,
        Comp::NegD, Comp::NegA, Comp::NegM,
        Comp::DPlusOne, Comp::APlusOne, Comp::MPlusOne,
        Comp::DMinusOne, Comp::AMinusOne, Comp::MMinusOne,
        Comp::DPlusA, Comp::DPlusM,
        Comp::DMinusA, Comp::DMinusM,
        Comp::AMinusD, Comp::MMinusD,
        Comp::DAndA, Comp::DAndM,
        Comp::DOrA, Comp::DOrM,
    ];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Comp::Zero => "0",
            Comp::One => "1",
            Comp::NegOne => "-1",
            Comp::D => "D",
            Comp::A => "A",
            Comp::M => "M",
            Comp::NotD => "!D",
            Comp::NotA => "!A",
            Comp::NotM => "!M",
            Comp::NegD => "-D",
            Comp::NegA => "-A",
            Comp::NegM => "-M",
            Comp::DPlusOne => "D+1",
            Comp::APlusOne => "A+1",
            Comp::MPlusOne => "M+1",
            Comp::DMinusOne => "D-1",
            Comp::AMinusOne => "A-1",
            Comp::MMinusOne => "M-1",
            Comp::DPlusA => "D+A",
            Comp::DPlusM => "D+M",
            Comp::DMinusA => "D-A",
            Comp::DMinusM => "D-M",
            Comp::AMinusD => "A-D",
            Comp::MMinusD => "M-D",
            Comp::DAndA => "D&A",
            Comp::DAndM => "D&M",
            Comp::DOrA => "D|A",
            Comp::DOrM => "D|M",
        }
    }

    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.mnemonic() == s)
    }

    /// Whether the computation reads RAM[A]
    pub fn reads_memory(&self) -> bool {
        self.mnemonic().contains('M')
    }
}

/// Jump conditions, tested against the ALU output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jump {
    Jgt,
    Jeq,
    Jge,
    Jlt,
    Jne,
    Jle,
    Jmp,
}

impl Jump {
    pub const ALL: [Jump; 7] = [Jump::Jgt, Jump::Jeq, Jump::Jge, Jump::Jlt, Jump::Jne, Jump::Jle, Jump::Jmp];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Jump::Jgt => "JGT",
            Jump::Jeq => "JEQ",
            Jump::Jge => "JGE",
            Jump::Jlt => "JLT",
            Jump::Jne => "JNE",
            Jump::Jle => "JLE",
            Jump::Jmp => "JMP",
        }
    }

    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.mnemonic() == s)
    }

    /// Whether the jump is taken for a given (signed) ALU output
    pub fn taken(&self, out: i16) -> bool {
        match self {
            Jump::Jgt => out > 0,
            Jump::Jeq => out == 0,
            Jump::Jge => out >= 0,
            Jump::Jlt => out < 0,
            Jump::Jne => out != 0,
            Jump::Jle => out <= 0,
            Jump::Jmp => true,
        }
    }
}

/// Hack assembly instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsmInst {
    /// `@value`: A = value
    At(Address),
    /// `dest=comp;jump`
    Compute {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
    /// `(NAME)`: binds NAME to the next instruction address
    Label(String),
    /// `// text`
    Comment(String),
}

impl AsmInst {
    pub fn at(value: u16) -> Self {
        AsmInst::At(Address::Constant(value))
    }

    pub fn at_symbol(name: impl Into<String>) -> Self {
        AsmInst::At(Address::Symbol(name.into()))
    }

    /// `dest=comp`
    pub fn assign(dest: Dest, comp: Comp) -> Self {
        AsmInst::Compute { dest: Some(dest), comp, jump: None }
    }

    /// `comp;jump`
    pub fn jump(comp: Comp, jump: Jump) -> Self {
        AsmInst::Compute { dest: None, comp, jump: Some(jump) }
    }

    pub fn label(name: impl Into<String>) -> Self {
        AsmInst::Label(name.into())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        AsmInst::Comment(text.into())
    }

    /// Whether this occupies a ROM word once assembled
    pub fn is_executable(&self) -> bool {
        matches!(self, AsmInst::At(_) | AsmInst::Compute { .. })
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::At(addr) => write!(f, "@{}", addr),
            AsmInst::Compute { dest, comp, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{}=", dest.mnemonic())?;
                }
                f.write_str(comp.mnemonic())?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump.mnemonic())?;
                }
                Ok(())
            }
            AsmInst::Label(name) => write!(f, "({})", name),
            AsmInst::Comment(text) => write!(f, "// {}", text),
        }
    }
}
