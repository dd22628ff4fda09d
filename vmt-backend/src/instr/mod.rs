//! Instruction lowering dispatch
//!
//! Every `VmInstruction` variant maps to exactly one generator. Generators
//! return structured `AsmInst`s; rendering to text happens in the emitter.

pub(crate) mod arithmetic;
pub(crate) mod comparison;
pub(crate) mod control_flow;
pub(crate) mod stack;

use crate::context::UnitContext;
use crate::function::calling_convention::CallingConvention;
use crate::TranslatorOptions;
use log::trace;
use vmt_codegen::{AsmInst, Comp, Jump};
use vmt_common::TranslateError;
use vmt_frontend::{ArithmeticOp, VmInstruction};

/// Lower one instruction in the given unit context
pub fn lower_instruction(
    inst: &VmInstruction,
    ctx: &mut UnitContext,
    options: &TranslatorOptions,
) -> Result<Vec<AsmInst>, TranslateError> {
    trace!("lowering '{}' in {}", inst, ctx.unit_name());
    // Instructions built in code skip the parser's range checks
    inst.check_bounds()?;
    let cc = CallingConvention::new();

    let insts = match inst {
        VmInstruction::Push { segment, index } => stack::lower_push(*segment, *index, ctx),
        VmInstruction::Pop { segment, index } => stack::lower_pop(*segment, *index, ctx)?,
        VmInstruction::Arithmetic(op) => lower_arithmetic(*op, ctx),
        VmInstruction::Label(name) => {
            control_flow::lower_label(ctx.resolve_label(name, options.scope_labels))
        }
        VmInstruction::Goto(name) => {
            control_flow::lower_goto(ctx.resolve_label(name, options.scope_labels))
        }
        VmInstruction::IfGoto(name) => {
            control_flow::lower_if_goto(ctx.resolve_label(name, options.scope_labels))
        }
        VmInstruction::Function { name, locals } => {
            ctx.enter_function(name);
            cc.function_entry(name, *locals)
        }
        VmInstruction::Call { name, args } => {
            let return_label = ctx.mint_return_label(name);
            cc.call(name, *args, return_label)
        }
        VmInstruction::Return => cc.function_return(),
    };
    Ok(insts)
}

fn lower_arithmetic(op: ArithmeticOp, ctx: &mut UnitContext) -> Vec<AsmInst> {
    match op {
        ArithmeticOp::Add => arithmetic::lower_binary(Comp::DPlusM),
        ArithmeticOp::Sub => arithmetic::lower_binary(Comp::MMinusD),
        ArithmeticOp::And => arithmetic::lower_binary(Comp::DAndM),
        ArithmeticOp::Or => arithmetic::lower_binary(Comp::DOrM),
        ArithmeticOp::Neg => arithmetic::lower_unary(Comp::NegM),
        ArithmeticOp::Not => arithmetic::lower_unary(Comp::NotM),
        ArithmeticOp::Eq => comparison::lower_comparison(ctx.mint_comparison_labels(op), Jump::Jeq),
        ArithmeticOp::Gt => comparison::lower_comparison(ctx.mint_comparison_labels(op), Jump::Jgt),
        ArithmeticOp::Lt => comparison::lower_comparison(ctx.mint_comparison_labels(op), Jump::Jlt),
    }
}
