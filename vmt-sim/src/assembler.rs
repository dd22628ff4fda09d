//! Two-pass assembler for Hack assembly text
//!
//! Pass one binds `(LABEL)` declarations to ROM addresses. Pass two resolves
//! `@symbol` operands, allocating unknown symbols as variables from RAM 16
//! upwards in order of first use.

use crate::constants::{MAX_ADDRESS_CONSTANT, PREDEFINED, VARIABLE_BASE};
use crate::SimError;
use log::trace;
use std::collections::HashMap;
use vmt_codegen::{Comp, Dest, Jump};

/// A resolved machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    Load(u16),
    Compute {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub rom: Vec<Instr>,
    pub symbols: HashMap<String, u16>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.rom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rom.is_empty()
    }

    /// Address bound to a label or variable
    pub fn symbol(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }
}

enum Line<'a> {
    Label(&'a str),
    At(&'a str),
    Compute(&'a str),
}

fn classify(text: &str) -> Option<Line<'_>> {
    let code = match text.find("//") {
        Some(pos) => &text[..pos],
        None => text,
    }
    .trim();

    if code.is_empty() {
        None
    } else if let Some(label) = code.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(Line::Label(label))
    } else if let Some(operand) = code.strip_prefix('@') {
        Some(Line::At(operand))
    } else {
        Some(Line::Compute(code))
    }
}

fn parse_compute(text: &str, line: usize) -> Result<Instr, SimError> {
    let syntax = || SimError::Syntax { line, text: text.to_string() };

    let (dest, rest) = match text.split_once('=') {
        Some((d, rest)) => (Some(Dest::from_mnemonic(d.trim()).ok_or_else(syntax)?), rest),
        None => (None, text),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((c, j)) => (c, Some(Jump::from_mnemonic(j.trim()).ok_or_else(syntax)?)),
        None => (rest, None),
    };
    let comp = Comp::from_mnemonic(comp.trim()).ok_or_else(syntax)?;
    Ok(Instr::Compute { dest, comp, jump })
}

pub fn assemble(source: &str) -> Result<Program, SimError> {
    let mut symbols: HashMap<String, u16> = PREDEFINED
        .iter()
        .map(|(name, addr)| (name.to_string(), *addr))
        .chain((0..16).map(|i| (format!("R{}", i), i)))
        .collect();

    // Pass one: labels
    let mut rom_address: u16 = 0;
    for (i, text) in source.lines().enumerate() {
        match classify(text) {
            Some(Line::Label(label)) => {
                if symbols.insert(label.to_string(), rom_address).is_some() {
                    return Err(SimError::DuplicateLabel { line: i + 1, label: label.to_string() });
                }
            }
            Some(_) => rom_address += 1,
            None => {}
        }
    }

    // Pass two: instructions and variables
    let mut rom = Vec::with_capacity(rom_address as usize);
    let mut next_variable = VARIABLE_BASE;
    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        match classify(text) {
            Some(Line::At("")) => {
                return Err(SimError::Syntax { line, text: text.trim().to_string() });
            }
            Some(Line::At(operand)) => {
                let value = if operand.bytes().all(|b| b.is_ascii_digit()) {
                    operand
                        .parse::<u16>()
                        .ok()
                        .filter(|v| *v <= MAX_ADDRESS_CONSTANT)
                        .ok_or_else(|| SimError::ConstantTooLarge { line, value: operand.to_string() })?
                } else {
                    *symbols.entry(operand.to_string()).or_insert_with(|| {
                        let addr = next_variable;
                        next_variable += 1;
                        trace!("variable {} -> {}", operand, addr);
                        addr
                    })
                };
                rom.push(Instr::Load(value));
            }
            Some(Line::Compute(code)) => rom.push(parse_compute(code, line)?),
            Some(Line::Label(_)) | None => {}
        }
    }

    Ok(Program { rom, symbols })
}
