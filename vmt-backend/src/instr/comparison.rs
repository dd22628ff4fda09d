//! Comparison lowering
//!
//! Results use the canonical boolean encoding: -1 (all bits set) for true,
//! 0 for false.

use super::stack::{address_top, pop_to_d};
use crate::naming::ComparisonLabels;
use vmt_codegen::{AsmInst, Comp, Dest, Jump};

/// Lower a comparison; `jump` is the test that makes `x - y` true
pub(crate) fn lower_comparison(names: ComparisonLabels, jump: Jump) -> Vec<AsmInst> {
    // D = x - y, with the stack already shrunk by one
    let mut insts = pop_to_d();
    insts.push(AsmInst::assign(Dest::A, Comp::AMinusOne));
    insts.push(AsmInst::assign(Dest::D, Comp::MMinusD));
    insts.push(AsmInst::at_symbol(names.if_true.clone()));
    insts.push(AsmInst::jump(Comp::D, jump));

    insts.extend(address_top());
    insts.push(AsmInst::assign(Dest::M, Comp::Zero));
    insts.push(AsmInst::at_symbol(names.end.clone()));
    insts.push(AsmInst::jump(Comp::Zero, Jump::Jmp));

    insts.push(AsmInst::label(names.if_true));
    insts.extend(address_top());
    insts.push(AsmInst::assign(Dest::M, Comp::NegOne));
    insts.push(AsmInst::label(names.end));
    insts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::LabelAllocator;
    use pretty_assertions::assert_eq;
    use vmt_frontend::ArithmeticOp;

    #[test]
    fn test_comparison_template() {
        let mut labels = LabelAllocator::new();
        let rendered: Vec<String> = lower_comparison(labels.comparison(ArithmeticOp::Gt), Jump::Jgt)
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "@SP", "AM=M-1", "D=M", "A=A-1", "D=M-D",
                "@GT_TRUE_0", "D;JGT",
                "@SP", "A=M-1", "M=0",
                "@GT_END_0", "0;JMP",
                "(GT_TRUE_0)",
                "@SP", "A=M-1", "M=-1",
                "(GT_END_0)",
            ]
        );
    }

    #[test]
    fn test_each_occurrence_gets_new_labels() {
        let mut labels = LabelAllocator::new();
        let a = lower_comparison(labels.comparison(ArithmeticOp::Eq), Jump::Jeq);
        let b = lower_comparison(labels.comparison(ArithmeticOp::Eq), Jump::Jeq);
        assert!(a.contains(&AsmInst::label("EQ_TRUE_0")));
        assert!(b.contains(&AsmInst::label("EQ_TRUE_1")));
        assert!(b.contains(&AsmInst::label("EQ_END_1")));
    }
}
