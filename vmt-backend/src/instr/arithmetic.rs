//! Arithmetic and bitwise lowering
//!
//! Binary operations compute in place: the second operand is popped into D
//! and the result overwrites the first operand's cell, so SP drops by one.
//! Unary operations rewrite the top cell without moving SP.

use super::stack::{address_top, pop_to_d};
use vmt_codegen::{AsmInst, Comp, Dest};

pub(crate) fn lower_binary(comp: Comp) -> Vec<AsmInst> {
    let mut insts = pop_to_d();
    insts.push(AsmInst::assign(Dest::A, Comp::AMinusOne));
    insts.push(AsmInst::assign(Dest::M, comp));
    insts
}

pub(crate) fn lower_unary(comp: Comp) -> Vec<AsmInst> {
    let mut insts = address_top();
    insts.push(AsmInst::assign(Dest::M, comp));
    insts
}
