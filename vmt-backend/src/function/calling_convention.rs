//! Calling Convention Implementation
//!
//! All saved state lives on the operand stack. A call site pushes a frame of
//! five cells above the arguments:
//!
//! ```text
//!   ARG ->  argument 0
//!           ...
//!           argument n-1
//!           return address      FRAME-5
//!           saved LCL           FRAME-4
//!           saved ARG           FRAME-3
//!           saved THIS          FRAME-2
//!           saved THAT          FRAME-1
//!   LCL ->  local 0             FRAME
//!           ...
//! ```
//!
//! `return` unwinds that frame through scratch cells R13 (FRAME) and R14
//! (return address).

use crate::instr::stack::{pop_to_d, push_d};
use crate::memory::{ARG, FRAME_SIZE, LCL, SCRATCH_ADDR, SCRATCH_RET, SP, STACK_BASE, THAT, THIS};
use log::debug;
use vmt_codegen::{AsmInst, Comp, Dest, Jump};

/// Base pointers saved by a call site, in push order
const SAVED_POINTERS: [&str; 4] = [LCL, ARG, THIS, THAT];

pub(crate) struct CallingConvention {}

impl Default for CallingConvention {
    fn default() -> Self {
        Self::new()
    }
}

impl CallingConvention {
    pub(crate) fn new() -> Self {
        Self {}
    }

    /// `function name nVars`: entry label plus nVars zeroed locals
    pub(crate) fn function_entry(&self, name: &str, locals: u16) -> Vec<AsmInst> {
        debug!("function {} with {} locals", name, locals);
        let mut insts = vec![AsmInst::label(name)];
        for _ in 0..locals {
            insts.extend([
                AsmInst::at_symbol(SP),
                AsmInst::assign(Dest::A, Comp::M),
                AsmInst::assign(Dest::M, Comp::Zero),
                AsmInst::at_symbol(SP),
                AsmInst::assign(Dest::M, Comp::MPlusOne),
            ]);
        }
        insts
    }

    /// `call name nArgs`, resuming at `return_label`. `args` is at most
    /// `vmt_frontend::instruction::MAX_CALL_ARGS`, so `args + FRAME_SIZE` still fits an immediate.
    pub(crate) fn call(&self, name: &str, args: u16, return_label: String) -> Vec<AsmInst> {
        debug!("call {} with {} args, returning to {}", name, args, return_label);
        let mut insts = Vec::new();

        insts.push(AsmInst::at_symbol(return_label.clone()));
        insts.push(AsmInst::assign(Dest::D, Comp::A));
        insts.extend(push_d());

        for pointer in SAVED_POINTERS {
            insts.push(AsmInst::at_symbol(pointer));
            insts.push(AsmInst::assign(Dest::D, Comp::M));
            insts.extend(push_d());
        }

        // ARG = SP - nArgs - 5
        insts.extend([
            AsmInst::at_symbol(SP),
            AsmInst::assign(Dest::D, Comp::M),
            AsmInst::at(args + FRAME_SIZE),
            AsmInst::assign(Dest::D, Comp::DMinusA),
            AsmInst::at_symbol(ARG),
            AsmInst::assign(Dest::M, Comp::D),
        ]);

        // LCL = SP
        insts.extend([
            AsmInst::at_symbol(SP),
            AsmInst::assign(Dest::D, Comp::M),
            AsmInst::at_symbol(LCL),
            AsmInst::assign(Dest::M, Comp::D),
        ]);

        insts.push(AsmInst::at_symbol(name));
        insts.push(AsmInst::jump(Comp::Zero, Jump::Jmp));
        insts.push(AsmInst::label(return_label));
        insts
    }

    /// `return`: hand the top of stack to the caller and restore its frame
    pub(crate) fn function_return(&self) -> Vec<AsmInst> {
        let mut insts = vec![
            // FRAME = LCL
            AsmInst::at_symbol(LCL),
            AsmInst::assign(Dest::D, Comp::M),
            AsmInst::at_symbol(SCRATCH_ADDR),
            AsmInst::assign(Dest::M, Comp::D),
            // RET = *(FRAME - 5), read before *ARG can overwrite it (nArgs == 0)
            AsmInst::at(FRAME_SIZE),
            AsmInst::assign(Dest::A, Comp::DMinusA),
            AsmInst::assign(Dest::D, Comp::M),
            AsmInst::at_symbol(SCRATCH_RET),
            AsmInst::assign(Dest::M, Comp::D),
        ];

        // *ARG = pop()
        insts.extend(pop_to_d());
        insts.extend([
            AsmInst::at_symbol(ARG),
            AsmInst::assign(Dest::A, Comp::M),
            AsmInst::assign(Dest::M, Comp::D),
        ]);

        // SP = ARG + 1
        insts.extend([
            AsmInst::at_symbol(ARG),
            AsmInst::assign(Dest::D, Comp::MPlusOne),
            AsmInst::at_symbol(SP),
            AsmInst::assign(Dest::M, Comp::D),
        ]);

        // THAT, THIS, ARG, LCL = *(FRAME-1) .. *(FRAME-4)
        for pointer in SAVED_POINTERS.iter().rev() {
            insts.extend([
                AsmInst::at_symbol(SCRATCH_ADDR),
                AsmInst::assign(Dest::AM, Comp::MMinusOne),
                AsmInst::assign(Dest::D, Comp::M),
                AsmInst::at_symbol(*pointer),
                AsmInst::assign(Dest::M, Comp::D),
            ]);
        }

        insts.extend([
            AsmInst::at_symbol(SCRATCH_RET),
            AsmInst::assign(Dest::A, Comp::M),
            AsmInst::jump(Comp::Zero, Jump::Jmp),
        ]);
        insts
    }
}

/// Start-up code: SP = 256, then `call Sys.init 0`
pub fn bootstrap(return_label: String) -> Vec<AsmInst> {
    let mut insts = vec![
        AsmInst::at(STACK_BASE),
        AsmInst::assign(Dest::D, Comp::A),
        AsmInst::at_symbol(SP),
        AsmInst::assign(Dest::M, Comp::D),
    ];
    insts.extend(CallingConvention::new().call("Sys.init", 0, return_label));
    insts
}
