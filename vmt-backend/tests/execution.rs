//! Runs generated assembly on the CPU model and checks machine state.

use indoc::indoc;
use vmt_backend::{translate, Translator, TranslatorOptions};
use vmt_sim::{assemble, Cpu};

const SP: u16 = 0;
const LCL: u16 = 1;
const ARG: u16 = 2;
const THIS: u16 = 3;
const THAT: u16 = 4;

const STEP_LIMIT: usize = 1_000_000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Load translated `source` with a conventional starting frame
fn load(source: &str) -> Cpu {
    init_logging();
    let asm = translate("Test", source);
    let program = assemble(&asm).expect("generated assembly should assemble");
    let mut cpu = Cpu::new(program);
    cpu.poke(SP, 256);
    cpu.poke(LCL, 300);
    cpu.poke(ARG, 400);
    cpu.poke(THIS, 3000);
    cpu.poke(THAT, 3010);
    cpu
}

fn run(source: &str) -> Cpu {
    let mut cpu = load(source);
    cpu.run(STEP_LIMIT).expect("program should halt");
    cpu
}

#[test]
fn test_add_two_constants() {
    let cpu = run("push constant 7\npush constant 8\nadd\n");
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.stack_top(), 15);
}

#[test]
fn test_equal_values_compare_true() {
    let cpu = run("push constant 5\npush constant 5\neq\n");
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.stack_top(), -1);
}

#[test]
fn test_comparisons() {
    let cases = [
        ("push constant 3\npush constant 5\nlt\n", -1),
        ("push constant 3\npush constant 5\ngt\n", 0),
        ("push constant 892\npush constant 891\ngt\n", -1),
        ("push constant 891\npush constant 892\neq\n", 0),
        ("push constant 32766\npush constant 32766\nlt\n", 0),
    ];
    for (source, expected) in cases {
        let cpu = run(source);
        assert_eq!(cpu.stack_top(), expected, "{}", source);
        assert_eq!(cpu.peek(SP), 257, "{}", source);
    }
}

#[test]
fn test_arithmetic_and_bitwise() {
    let cases = [
        ("push constant 10\npush constant 3\nsub\n", 7),
        ("push constant 10\nneg\n", -10),
        ("push constant 12\npush constant 10\nand\n", 8),
        ("push constant 12\npush constant 10\nor\n", 14),
        ("push constant 0\nnot\n", -1),
        ("push constant 1\nnot\n", -2),
    ];
    for (source, expected) in cases {
        let cpu = run(source);
        assert_eq!(cpu.stack_top(), expected, "{}", source);
    }
}

#[test]
fn test_unary_ops_leave_stack_pointer() {
    let cpu = run("push constant 4\nneg\nnot\n");
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.stack_top(), 3);
}

#[test]
fn test_if_goto_treats_zero_as_false() {
    let cpu = run(indoc! {"
        push constant 0
        if-goto SKIP
        push constant 1
        label SKIP
    "});
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.stack_top(), 1);
}

#[test]
fn test_if_goto_treats_any_nonzero_as_true() {
    for condition in ["push constant 5\npush constant 5\neq", "push constant 7"] {
        let source = format!("{}\nif-goto SKIP\npush constant 1\nlabel SKIP\n", condition);
        let cpu = run(&source);
        assert_eq!(cpu.peek(SP), 256, "{}", condition);
    }
}

#[test]
fn test_goto_skips_code() {
    let cpu = run(indoc! {"
        goto OVER
        push constant 99
        label OVER
        push constant 1
    "});
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.stack_top(), 1);
}

#[test]
fn test_loop_sums_to_n() {
    let cpu = run(indoc! {"
        push constant 0
        pop local 0
        push constant 10
        pop local 1
        label LOOP
        push local 1
        push constant 0
        eq
        if-goto END
        push local 0
        push local 1
        add
        pop local 0
        push local 1
        push constant 1
        sub
        pop local 1
        goto LOOP
        label END
        push local 0
    "});
    assert_eq!(cpu.stack_top(), 55);
    assert_eq!(cpu.peek(300), 55);
}

#[test]
fn test_pop_writes_segment_cells() {
    let cases = [
        ("local 2", 302),
        ("argument 1", 401),
        ("this 6", 3006),
        ("that 5", 3015),
        ("temp 6", 11),
        ("pointer 0", THIS),
        ("pointer 1", THAT),
    ];
    for (target, addr) in cases {
        let cpu = run(&format!("push constant 1234\npop {}\n", target));
        assert_eq!(cpu.peek(addr), 1234, "pop {}", target);
        assert_eq!(cpu.peek(SP), 256, "pop {}", target);
    }
}

#[test]
fn test_pointer_retargets_this_and_that() {
    let cpu = run(indoc! {"
        push constant 3030
        pop pointer 0
        push constant 3040
        pop pointer 1
        push constant 32
        pop this 2
        push constant 46
        pop that 6
        push this 2
        push that 6
        add
    "});
    assert_eq!(cpu.peek(3032), 32);
    assert_eq!(cpu.peek(3046), 46);
    assert_eq!(cpu.stack_top(), 78);
}

#[test]
fn test_push_pop_round_trip_every_segment() {
    let segments = ["local", "argument", "this", "that", "temp", "static", "pointer"];
    for segment in segments {
        let indices: &[u16] = match segment {
            "pointer" => &[0, 1],
            "temp" => &[0, 7],
            _ => &[0, 3, 9],
        };
        for &index in indices {
            let source = format!("push {0} {1}\npop {0} {1}\n", segment, index);
            let mut cpu = load(&source);

            let addr = match segment {
                "local" => 300 + index,
                "argument" => 400 + index,
                "this" => 3000 + index,
                "that" => 3010 + index,
                "temp" => 5 + index,
                "pointer" => 3 + index,
                _ => cpu.program().symbol(&format!("Test.{}", index)).expect("static symbol"),
            };
            if segment != "pointer" {
                cpu.poke(addr, -4321);
            }
            let before = cpu.peek(addr);

            cpu.run(STEP_LIMIT).unwrap();
            assert_eq!(cpu.peek(addr), before, "{} {}", segment, index);
            assert_eq!(cpu.peek(SP), 256, "{} {}", segment, index);
        }
    }
}

#[test]
fn test_static_round_trip_within_unit() {
    let cpu = run(indoc! {"
        push constant 111
        pop static 3
        push constant 222
        pop static 8
        push static 3
        push static 8
        sub
    "});
    assert_eq!(cpu.peek_symbol("Test.3"), Some(111));
    assert_eq!(cpu.peek_symbol("Test.8"), Some(222));
    assert_eq!(cpu.stack_top(), -111);
}

#[test]
fn test_call_and_return_restore_caller_frame() {
    let cpu = run(indoc! {"
        push constant 3
        push constant 4
        call Adder.add 2
        goto DONE
        function Adder.add 1
        push constant 5000
        pop pointer 0
        push constant 6000
        pop pointer 1
        push argument 0
        push argument 1
        add
        pop local 0
        push local 0
        return
        label DONE
    "});

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 7);
    assert_eq!(cpu.peek(LCL), 300);
    assert_eq!(cpu.peek(ARG), 400);
    assert_eq!(cpu.peek(THIS), 3000);
    assert_eq!(cpu.peek(THAT), 3010);
}

#[test]
fn test_call_with_no_arguments() {
    let cpu = run(indoc! {"
        call Const.seven 0
        goto DONE
        function Const.seven 0
        push constant 7
        return
        label DONE
    "});
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 7);
    assert_eq!(cpu.peek(LCL), 300);
    assert_eq!(cpu.peek(ARG), 400);
}

#[test]
fn test_function_locals_start_at_zero() {
    let mut cpu = load(indoc! {"
        call Locals.third 0
        goto DONE
        function Locals.third 3
        push local 2
        return
        label DONE
    "});
    for addr in 256..280 {
        cpu.poke(addr, 99);
    }
    cpu.run(STEP_LIMIT).unwrap();
    assert_eq!(cpu.peek(256), 0);
    assert_eq!(cpu.peek(SP), 257);
}

#[test]
fn test_recursive_fibonacci() {
    let cpu = run(indoc! {"
        push constant 10
        call Main.fib 1
        goto DONE
        function Main.fib 0
        push argument 0
        push constant 2
        lt
        if-goto BASE
        push argument 0
        push constant 1
        sub
        call Main.fib 1
        push argument 0
        push constant 2
        sub
        call Main.fib 1
        add
        return
        label BASE
        push argument 0
        return
        label DONE
    "});
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 55);
    assert_eq!(cpu.peek(LCL), 300);
    assert_eq!(cpu.peek(ARG), 400);
    assert_eq!(cpu.peek(THIS), 3000);
    assert_eq!(cpu.peek(THAT), 3010);
}

#[test]
fn test_bootstrapped_program_with_two_units() {
    init_logging();
    let options = TranslatorOptions { bootstrap: true, ..Default::default() };
    let translator = Translator::new(options);
    let units = [
        ("Main", "function Main.main 0\npush constant 42\nreturn\n"),
        (
            "Sys",
            "function Sys.init 0\ncall Main.main 0\npop temp 0\ngoto DONE\nlabel DONE\n",
        ),
    ];
    let translation = translator.translate_program(units);
    assert!(!translation.has_errors());

    let mut cpu = Cpu::new(assemble(&translation.to_text()).unwrap());
    cpu.run(STEP_LIMIT).unwrap();

    assert_eq!(cpu.peek(5), 42);
    // Sys.init's frame is still live: 256 + 5 saved cells
    assert_eq!(cpu.peek(SP), 261);
    assert_eq!(cpu.peek(LCL), 261);
}

#[test]
fn test_statics_are_separate_per_unit() {
    init_logging();
    let translator = Translator::new(TranslatorOptions::default());
    let units = [
        ("First", "push constant 11\npop static 0\n"),
        ("Second", "push constant 22\npop static 0\npush static 0\n"),
    ];
    let translation = translator.translate_program(units);
    let mut cpu = Cpu::new(assemble(&translation.to_text()).unwrap());
    cpu.poke(SP, 256);
    cpu.run(STEP_LIMIT).unwrap();

    assert_eq!(cpu.peek_symbol("First.0"), Some(11));
    assert_eq!(cpu.peek_symbol("Second.0"), Some(22));
    assert_eq!(cpu.stack_top(), 22);
}

#[test]
fn test_bad_lines_do_not_break_execution() {
    let cpu = run(indoc! {"
        push constant 2
        foo bar baz
        push heap 3
        push constant 3
        add
    "});
    assert_eq!(cpu.stack_top(), 5);
    assert_eq!(cpu.peek(SP), 257);
}

#[test]
fn test_rom_holds_only_executable_instructions() {
    init_logging();
    let source = "push constant 1\nlabel L\npush constant 2\nlt\nif-goto L\ncall F.g 0\n";
    let translation = Translator::new(TranslatorOptions::default()).translate_program([("Main", source)]);
    let program = assemble(&translation.to_text()).unwrap();

    let executable = translation.instructions().filter(|i| i.is_executable()).count();
    assert_eq!(program.len(), executable);
}
