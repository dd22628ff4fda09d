//! Hack CPU model
//!
//! Registers and RAM words are 16-bit two's complement. Execution stops when
//! the program counter moves past the end of ROM.

use crate::assembler::{Instr, Program};
use crate::constants::RAM_SIZE;
use crate::SimError;
use log::trace;
use vmt_codegen::Comp;

pub struct Cpu {
    program: Program,
    pub ram: Vec<i16>,
    pub a: i16,
    pub d: i16,
    pub pc: usize,
    steps: usize,
}

impl Cpu {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            steps: 0,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn peek(&self, addr: u16) -> i16 {
        self.ram[addr as usize % RAM_SIZE]
    }

    pub fn poke(&mut self, addr: u16, value: i16) {
        self.ram[addr as usize % RAM_SIZE] = value;
    }

    /// Value of a predefined or allocated symbol's RAM cell
    pub fn peek_symbol(&self, name: &str) -> Option<i16> {
        self.program.symbol(name).map(|addr| self.peek(addr))
    }

    /// Current top-of-stack cell, RAM[RAM[SP] - 1]
    pub fn stack_top(&self) -> i16 {
        let sp = self.peek(0) as u16;
        self.peek(sp.wrapping_sub(1))
    }

    pub fn is_halted(&self) -> bool {
        self.pc >= self.program.rom.len()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn memory_index(&self) -> Result<usize, SimError> {
        let addr = self.a as u16;
        if (addr as usize) < self.ram.len() {
            Ok(addr as usize)
        } else {
            Err(SimError::AddressOutOfRange(addr))
        }
    }

    fn compute(comp: Comp, a: i16, d: i16, m: i16) -> i16 {
        match comp {
            Comp::Zero => 0,
            Comp::One => 1,
            Comp::NegOne => -1,
            Comp::D => d,
            Comp::A => a,
            Comp::M => m,
            Comp::NotD => !d,
            Comp::NotA => !a,
            Comp::NotM => !m,
            Comp::NegD => d.wrapping_neg(),
            Comp::NegA => a.wrapping_neg(),
            Comp::NegM => m.wrapping_neg(),
            Comp::DPlusOne => d.wrapping_add(1),
            Comp::APlusOne => a.wrapping_add(1),
            Comp::MPlusOne => m.wrapping_add(1),
            Comp::DMinusOne => d.wrapping_sub(1),
            Comp::AMinusOne => a.wrapping_sub(1),
            Comp::MMinusOne => m.wrapping_sub(1),
            Comp::DPlusA => d.wrapping_add(a),
            Comp::DPlusM => d.wrapping_add(m),
            Comp::DMinusA => d.wrapping_sub(a),
            Comp::DMinusM => d.wrapping_sub(m),
            Comp::AMinusD => a.wrapping_sub(d),
            Comp::MMinusD => m.wrapping_sub(d),
            Comp::DAndA => d & a,
            Comp::DAndM => d & m,
            Comp::DOrA => d | a,
            Comp::DOrM => d | m,
        }
    }

    /// Execute one instruction; does nothing once halted
    pub fn step(&mut self) -> Result<(), SimError> {
        let Some(instr) = self.program.rom.get(self.pc).copied() else {
            return Ok(());
        };
        self.steps += 1;

        match instr {
            Instr::Load(value) => {
                self.a = value as i16;
                self.pc += 1;
            }
            Instr::Compute { dest, comp, jump } => {
                let writes_m = dest.is_some_and(|d| d.writes_m());
                let m = if comp.reads_memory() || writes_m {
                    self.ram[self.memory_index()?]
                } else {
                    0
                };
                let out = Self::compute(comp, self.a, self.d, m);
                let jump_target = self.a as u16 as usize;

                if let Some(dest) = dest {
                    if dest.writes_m() {
                        let idx = self.memory_index()?;
                        self.ram[idx] = out;
                    }
                    if dest.writes_a() {
                        self.a = out;
                    }
                    if dest.writes_d() {
                        self.d = out;
                    }
                }

                self.pc = match jump {
                    Some(j) if j.taken(out) => jump_target,
                    _ => self.pc + 1,
                };
            }
        }
        Ok(())
    }

    /// Run until the program halts; returns the number of steps taken
    pub fn run(&mut self, max_steps: usize) -> Result<usize, SimError> {
        let start = self.steps;
        while !self.is_halted() {
            if self.steps - start >= max_steps {
                return Err(SimError::StepLimit(max_steps));
            }
            self.step()?;
        }
        trace!("halted after {} steps", self.steps - start);
        Ok(self.steps - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use indoc::indoc;

    fn run_source(source: &str) -> Cpu {
        let mut cpu = Cpu::new(assemble(source).unwrap());
        cpu.run(10_000).unwrap();
        cpu
    }

    #[test]
    fn test_add_two_constants() {
        let cpu = run_source(indoc! {"
            @2
            D=A
            @3
            D=D+A
            @R0
            M=D
        "});
        assert_eq!(cpu.peek(0), 5);
    }

    #[test]
    fn test_loop_and_variables() {
        let cpu = run_source(indoc! {"
            @5
            D=A
            @n
            M=D
            @sum
            M=0
            (LOOP)
            @n
            D=M
            @DONE
            D;JEQ
            @sum
            M=D+M
            @n
            M=M-1
            @LOOP
            0;JMP
            (DONE)
        "});
        assert_eq!(cpu.peek_symbol("sum"), Some(15));
        assert_eq!(cpu.peek_symbol("n"), Some(0));
    }

    #[test]
    fn test_arithmetic_wraps_at_16_bits() {
        let cpu = run_source("@32767\nD=A\nD=D+1\n@R1\nM=D\n");
        assert_eq!(cpu.peek(1), i16::MIN);
    }

    #[test]
    fn test_step_limit() {
        let mut cpu = Cpu::new(assemble("(HERE)\n@HERE\n0;JMP\n").unwrap());
        assert_eq!(cpu.run(100), Err(SimError::StepLimit(100)));
        assert_eq!(cpu.steps(), 100);
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_stack_top() {
        let mut cpu = Cpu::new(assemble("").unwrap());
        cpu.poke(0, 258);
        cpu.poke(257, -1);
        assert_eq!(cpu.stack_top(), -1);
        assert!(cpu.is_halted());
    }
}
