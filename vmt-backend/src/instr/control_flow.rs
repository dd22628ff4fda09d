//! Label, goto and if-goto lowering

use super::stack::pop_to_d;
use vmt_codegen::{AsmInst, Comp, Jump};

pub(crate) fn lower_label(label: String) -> Vec<AsmInst> {
    vec![AsmInst::label(label)]
}

pub(crate) fn lower_goto(label: String) -> Vec<AsmInst> {
    vec![AsmInst::at_symbol(label), AsmInst::jump(Comp::Zero, Jump::Jmp)]
}

/// Pop the condition and jump when it is non-zero
pub(crate) fn lower_if_goto(label: String) -> Vec<AsmInst> {
    let mut insts = pop_to_d();
    insts.push(AsmInst::at_symbol(label));
    insts.push(AsmInst::jump(Comp::D, Jump::Jne));
    insts
}
