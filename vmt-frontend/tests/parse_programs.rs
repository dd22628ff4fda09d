use indoc::indoc;
use pretty_assertions::assert_eq;
use vmt_common::TranslateError;
use vmt_frontend::{parse_program, ArithmeticOp, Segment, VmInstruction};

#[test]
fn test_simple_function_listing() {
    let source = indoc! {"
        // Computes the sum 1 + ... + n
        function Main.sum 1
            push constant 0
            pop local 0        // sum = 0
        label LOOP
            push argument 0
            push constant 0
            eq
            if-goto END
            push local 0
            push argument 0
            add
            pop local 0
            push argument 0
            push constant 1
            sub
            pop argument 0
            goto LOOP
        label END
            push local 0
            return
    "};

    let parsed = parse_program(source);
    let instructions: Vec<VmInstruction> =
        parsed.iter().map(|p| p.result.clone().unwrap()).collect();

    assert_eq!(instructions.len(), 20);
    assert_eq!(
        instructions[0],
        VmInstruction::Function { name: "Main.sum".to_string(), locals: 1 }
    );
    assert_eq!(
        instructions[2],
        VmInstruction::Pop { segment: Segment::Local, index: 0 }
    );
    assert_eq!(instructions[6], VmInstruction::Arithmetic(ArithmeticOp::Eq));
    assert_eq!(instructions[7], VmInstruction::IfGoto("END".to_string()));
    assert_eq!(instructions[19], VmInstruction::Return);

    // Line numbers refer to the physical input, comments included
    assert_eq!(parsed[0].line, 2);
    assert_eq!(parsed[2].text, "pop local 0");
}

#[test]
fn test_errors_are_per_line() {
    let source = indoc! {"
        push constant 1
        jump somewhere
        pop constant 0
        push local
        push constant 2
    "};

    let parsed = parse_program(source);
    assert_eq!(parsed.len(), 5);
    assert_eq!(parsed[1].result, Err(TranslateError::unknown_command("jump")));
    assert_eq!(parsed[2].result, Err(TranslateError::PopConstant));
    assert_eq!(
        parsed[3].result,
        Err(TranslateError::wrong_operand_count("push", 2, 1))
    );
    assert!(parsed[4].result.is_ok());
}
