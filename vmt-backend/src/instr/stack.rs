//! Push and pop lowering

use crate::context::UnitContext;
use crate::memory::{segment_access, SegmentAccess, SCRATCH_ADDR, SP};
use vmt_codegen::{AsmInst, Comp, Dest};
use vmt_common::TranslateError;
use vmt_frontend::Segment;

/// RAM[SP] = D; SP++
pub(crate) fn push_d() -> Vec<AsmInst> {
    vec![
        AsmInst::at_symbol(SP),
        AsmInst::assign(Dest::A, Comp::M),
        AsmInst::assign(Dest::M, Comp::D),
        AsmInst::at_symbol(SP),
        AsmInst::assign(Dest::M, Comp::MPlusOne),
    ]
}

/// SP--; D = RAM[SP]
pub(crate) fn pop_to_d() -> Vec<AsmInst> {
    vec![
        AsmInst::at_symbol(SP),
        AsmInst::assign(Dest::AM, Comp::MMinusOne),
        AsmInst::assign(Dest::D, Comp::M),
    ]
}

/// Point A at the current top-of-stack cell (RAM[SP-1])
pub(crate) fn address_top() -> Vec<AsmInst> {
    vec![AsmInst::at_symbol(SP), AsmInst::assign(Dest::A, Comp::MMinusOne)]
}

pub(crate) fn lower_push(segment: Segment, index: u16, ctx: &UnitContext) -> Vec<AsmInst> {
    let mut insts = match segment_access(segment, index, ctx) {
        SegmentAccess::Immediate(value) => {
            vec![AsmInst::at(value), AsmInst::assign(Dest::D, Comp::A)]
        }
        SegmentAccess::Static(symbol) => {
            vec![AsmInst::at_symbol(symbol), AsmInst::assign(Dest::D, Comp::M)]
        }
        SegmentAccess::Indirect { base, index } => vec![
            AsmInst::at(index),
            AsmInst::assign(Dest::D, Comp::A),
            AsmInst::at_symbol(base),
            AsmInst::assign(Dest::A, Comp::DPlusM),
            AsmInst::assign(Dest::D, Comp::M),
        ],
        SegmentAccess::Direct(addr) => {
            vec![AsmInst::at(addr), AsmInst::assign(Dest::D, Comp::M)]
        }
        SegmentAccess::Register(name) => {
            vec![AsmInst::at_symbol(name), AsmInst::assign(Dest::D, Comp::M)]
        }
    };
    insts.extend(push_d());
    insts
}

pub(crate) fn lower_pop(segment: Segment, index: u16, ctx: &UnitContext) -> Result<Vec<AsmInst>, TranslateError> {
    let target = match segment_access(segment, index, ctx) {
        SegmentAccess::Immediate(_) => return Err(TranslateError::PopConstant),
        SegmentAccess::Static(symbol) => AsmInst::at_symbol(symbol),
        SegmentAccess::Direct(addr) => AsmInst::at(addr),
        SegmentAccess::Register(name) => AsmInst::at_symbol(name),
        SegmentAccess::Indirect { base, index } => {
            // D is needed for the popped value, so stage the target address first
            let mut insts = vec![
                AsmInst::at(index),
                AsmInst::assign(Dest::D, Comp::A),
                AsmInst::at_symbol(base),
                AsmInst::assign(Dest::D, Comp::DPlusM),
                AsmInst::at_symbol(SCRATCH_ADDR),
                AsmInst::assign(Dest::M, Comp::D),
            ];
            insts.extend(pop_to_d());
            insts.extend([
                AsmInst::at_symbol(SCRATCH_ADDR),
                AsmInst::assign(Dest::A, Comp::M),
                AsmInst::assign(Dest::M, Comp::D),
            ]);
            return Ok(insts);
        }
    };

    let mut insts = pop_to_d();
    insts.push(target);
    insts.push(AsmInst::assign(Dest::M, Comp::D));
    Ok(insts)
}
