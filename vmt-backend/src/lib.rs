//! Hack VM Translator - Backend
//!
//! Lowers stack-machine VM instructions to Hack assembly. Translation is a
//! single pass over the parsed program; the only state carried between
//! instructions is the `UnitContext` (unit name, label counters, current
//! function). A bad line never aborts the unit: it becomes an error block in
//! the output and a diagnostic in the returned `Translation`.

pub mod context;
pub mod function;
pub mod instr;
pub mod memory;
pub mod naming;

pub use context::UnitContext;
pub use instr::lower_instruction;
pub use naming::{ComparisonLabels, LabelAllocator};
pub use vmt_codegen::{AsmInst, Block};
pub use vmt_common::{Diagnostic, DiagnosticLog, Severity, SourceLocation, TranslateError};

use log::{debug, info, warn};
use vmt_codegen::{emit_json, emit_text, EmitOptions};
use vmt_frontend::{parse_program, ParsedLine, VmInstruction};

/// Options for translation
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    /// Prefix every block with a comment echoing its VM instruction
    pub echo_source: bool,
    /// Qualify label/goto/if-goto names with the enclosing function
    pub scope_labels: bool,
    /// Prepend start-up code (SP = 256, call Sys.init)
    pub bootstrap: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            echo_source: true,
            scope_labels: false,
            bootstrap: false,
        }
    }
}

/// Result of translating one or more units
#[derive(Debug, Clone)]
pub struct Translation {
    pub blocks: Vec<Block>,
    pub diagnostics: DiagnosticLog,
    echo_source: bool,
}

impl Translation {
    fn new(echo_source: bool) -> Self {
        Self {
            blocks: Vec::new(),
            diagnostics: DiagnosticLog::new(),
            echo_source,
        }
    }

    /// Render as assembly text
    pub fn to_text(&self) -> String {
        emit_text(&self.blocks, &EmitOptions { echo_source: self.echo_source })
    }

    /// Render as a JSON listing of blocks
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        emit_json(&self.blocks)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// All generated instructions in program order
    pub fn instructions(&self) -> impl Iterator<Item = &AsmInst> {
        self.blocks.iter().flat_map(|b| b.instructions().iter())
    }
}

pub struct Translator {
    options: TranslatorOptions,
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }

    /// Translate one unit. Label counters continue from wherever `ctx`
    /// left them; use a fresh or reset context for an independent unit.
    pub fn translate(&self, source: &str, ctx: &mut UnitContext) -> Translation {
        let mut translation = Translation::new(self.options.echo_source);
        if self.options.bootstrap {
            self.emit_bootstrap(ctx, &mut translation);
        }
        self.translate_into(source, ctx, &mut translation);
        translation
    }

    /// Translate several units of one program with a shared label sequence.
    /// Each unit keeps its own static segment.
    pub fn translate_program<'a, I>(&self, units: I) -> Translation
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut translation = Translation::new(self.options.echo_source);
        let mut ctx: Option<UnitContext> = None;

        for (unit_name, source) in units {
            let first = ctx.is_none();
            let unit_ctx = ctx.get_or_insert_with(|| UnitContext::new(unit_name));
            if first {
                if self.options.bootstrap {
                    self.emit_bootstrap(unit_ctx, &mut translation);
                }
            } else {
                unit_ctx.begin_unit(unit_name);
            }
            self.translate_into(source, unit_ctx, &mut translation);
        }

        info!("translated program: {}", translation.diagnostics.summary());
        translation
    }

    fn emit_bootstrap(&self, ctx: &mut UnitContext, translation: &mut Translation) {
        let return_label = ctx.mint_return_label("Sys.init");
        translation.blocks.push(Block::new(
            SourceLocation::new(ctx.unit_name(), 0),
            "bootstrap",
            function::bootstrap(return_label),
        ));
    }

    fn translate_into(&self, source: &str, ctx: &mut UnitContext, translation: &mut Translation) {
        let parsed = parse_program(source);
        debug!("translating {} ({} instructions)", ctx.unit_name(), parsed.len());

        for ParsedLine { line, text, result } in parsed {
            let location = SourceLocation::new(ctx.unit_name(), line);
            let lowered = result.and_then(|inst| {
                self.check_declarations(&inst, ctx, &location, &mut translation.diagnostics);
                lower_instruction(&inst, ctx, &self.options)
            });

            let block = match lowered {
                Ok(insts) => Block::new(location, text, insts),
                Err(e) => {
                    warn!("{}: {}", location, e);
                    translation.diagnostics.error(&e, location.clone());
                    Block::failed(location, text, e)
                }
            };
            translation.blocks.push(block);
        }
    }

    /// Warnings that do not stop code generation
    fn check_declarations(
        &self,
        inst: &VmInstruction,
        ctx: &mut UnitContext,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticLog,
    ) {
        match inst {
            VmInstruction::Label(name) => {
                let label = ctx.resolve_label(name, self.options.scope_labels);
                Self::check_label("label", &label, ctx, location, diagnostics);
            }
            VmInstruction::Function { name, .. } => {
                Self::check_label("function", name, ctx, location, diagnostics);
            }
            VmInstruction::Return if ctx.current_function().is_none() => {
                diagnostics.warning("return outside of any function".to_string(), location.clone());
            }
            _ => {}
        }
    }

    /// A user label must not repeat an earlier one or take a name from the
    /// generated label families
    fn check_label(
        kind: &str,
        label: &str,
        ctx: &mut UnitContext,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticLog,
    ) {
        let fresh = ctx.declare_label(label);
        if naming::is_generated_label(label) {
            diagnostics.warning(
                format!("{} '{}' collides with a generated label name", kind, label),
                location.clone(),
            );
        } else if !fresh {
            diagnostics.warning(format!("{} '{}' declared more than once", kind, label), location.clone());
        }
    }
}

/// Translate a single unit with default options and a fresh context
pub fn translate(unit_name: &str, source: &str) -> String {
    let translator = Translator::new(TranslatorOptions::default());
    let mut ctx = UnitContext::new(unit_name);
    translator.translate(source, &mut ctx).to_text()
}
