//! Per-unit translation state
//!
//! A `UnitContext` carries everything that survives from one instruction to
//! the next: the unit's identity (which names its static variables), the
//! label counters, and the function currently being translated.

use crate::naming::{ComparisonLabels, LabelAllocator};
use std::collections::HashSet;
use vmt_frontend::ArithmeticOp;

#[derive(Debug, Clone)]
pub struct UnitContext {
    unit_name: String,
    labels: LabelAllocator,
    current_function: Option<String>,
    declared_labels: HashSet<String>,
}

impl UnitContext {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            labels: LabelAllocator::new(),
            current_function: None,
            declared_labels: HashSet::new(),
        }
    }

    pub fn unit_name(&self) -> &str {
        &self.unit_name
    }

    pub fn labels(&self) -> &LabelAllocator {
        &self.labels
    }

    /// Allocate the labels for one comparison and record them as declared
    pub(crate) fn mint_comparison_labels(&mut self, op: ArithmeticOp) -> ComparisonLabels {
        let names = self.labels.comparison(op);
        self.declared_labels.insert(names.if_true.clone());
        self.declared_labels.insert(names.end.clone());
        names
    }

    /// Allocate a call site's return label and record it as declared
    pub(crate) fn mint_return_label(&mut self, callee: &str) -> String {
        let label = self.labels.return_address(callee);
        self.declared_labels.insert(label.clone());
        label
    }

    pub fn current_function(&self) -> Option<&str> {
        self.current_function.as_deref()
    }

    pub(crate) fn enter_function(&mut self, name: &str) {
        self.current_function = Some(name.to_string());
    }

    /// Symbol backing `static index` in this unit
    pub fn static_symbol(&self, index: u16) -> String {
        format!("{}.{}", self.unit_name, index)
    }

    /// Final name of a user label, qualified by the enclosing function when
    /// `scoped` is set
    pub fn resolve_label(&self, name: &str, scoped: bool) -> String {
        match (&self.current_function, scoped) {
            (Some(function), true) => format!("{}${}", function, name),
            _ => name.to_string(),
        }
    }

    /// Record a declared label; false if it was already declared
    pub(crate) fn declare_label(&mut self, label: &str) -> bool {
        self.declared_labels.insert(label.to_string())
    }

    /// Switch to the next unit of the same program. Label counters and
    /// declared labels carry over so labels stay unique program-wide.
    pub fn begin_unit(&mut self, unit_name: impl Into<String>) {
        self.unit_name = unit_name.into();
        self.current_function = None;
    }

    /// Start over as if freshly constructed, keeping the unit name
    pub fn reset(&mut self) {
        self.labels.reset();
        self.current_function = None;
        self.declared_labels.clear();
    }
}
