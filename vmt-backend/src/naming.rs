//! Label allocation
//!
//! Comparisons and call sites need labels that are unique across a whole
//! translation unit. Both families come from monotonic counters owned by a
//! `LabelAllocator`, which lives in the unit's `UnitContext` so that starting
//! a fresh sequence is an explicit `reset()`.

use serde::{Deserialize, Serialize};
use vmt_frontend::ArithmeticOp;

const TRUE_TAG: &str = "_TRUE_";
const END_TAG: &str = "_END_";
const RETURN_TAG: &str = "$ret.";

const COMPARISONS: [ArithmeticOp; 3] = [ArithmeticOp::Eq, ArithmeticOp::Gt, ArithmeticOp::Lt];

/// The two labels used by one comparison occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonLabels {
    pub if_true: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAllocator {
    /// Shared by eq, gt and lt so every occurrence gets its own number
    next_comparison: u32,
    next_return: u32,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels for the next comparison, e.g. `GT_TRUE_3` / `GT_END_3`
    pub fn comparison(&mut self, op: ArithmeticOp) -> ComparisonLabels {
        let id = self.next_comparison;
        self.next_comparison += 1;
        let prefix = op.keyword().to_uppercase();
        ComparisonLabels {
            if_true: format!("{}{}{}", prefix, TRUE_TAG, id),
            end: format!("{}{}{}", prefix, END_TAG, id),
        }
    }

    /// Return label for the next call site, e.g. `Math.multiply$ret.4`
    pub fn return_address(&mut self, callee: &str) -> String {
        let id = self.next_return;
        self.next_return += 1;
        format!("{}{}{}", callee, RETURN_TAG, id)
    }

    pub fn comparisons_issued(&self) -> u32 {
        self.next_comparison
    }

    pub fn returns_issued(&self) -> u32 {
        self.next_return
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether `label` has the shape of a name this allocator mints, so a
/// user-declared label of that name could collide with generated code
pub fn is_generated_label(label: &str) -> bool {
    let numbered = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if let Some((callee, id)) = label.rsplit_once(RETURN_TAG) {
        if !callee.is_empty() && numbered(id) {
            return true;
        }
    }
    COMPARISONS.iter().any(|op| {
        let prefix = op.keyword().to_uppercase();
        [TRUE_TAG, END_TAG].iter().any(|tag| {
            label
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(tag))
                .is_some_and(numbered)
        })
    })
}
