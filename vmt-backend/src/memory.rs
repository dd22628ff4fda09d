//! Segment addressing model
//!
//! Fixed RAM layout of the Hack platform and the addressing recipe used for
//! each VM memory segment.

use crate::context::UnitContext;
use vmt_frontend::instruction::CALL_FRAME_SIZE;
use vmt_frontend::Segment;

/// Stack pointer cell
pub const SP: &str = "SP";
/// Base pointer cells for the relocatable segments
pub const LCL: &str = "LCL";
pub const ARG: &str = "ARG";
pub const THIS: &str = "THIS";
pub const THAT: &str = "THAT";

/// Scratch cell used to stage addresses (pop target, return FRAME)
pub const SCRATCH_ADDR: &str = "R13";
/// Scratch cell holding the return address during `return`
pub const SCRATCH_RET: &str = "R14";

/// First RAM cell of the temp segment
pub const TEMP_BASE: u16 = 5;
/// Initial stack pointer set by the bootstrap code
pub const STACK_BASE: u16 = 256;

/// Cells pushed by a call site below the callee's locals:
/// return address, LCL, ARG, THIS, THAT
pub const FRAME_SIZE: u16 = CALL_FRAME_SIZE;

/// How a segment cell is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentAccess {
    /// The index itself is the value
    Immediate(u16),
    /// A fixed symbol, resolved by the assembler
    Static(String),
    /// Base pointer cell holds an address; cell is `RAM[base] + index`
    Indirect { base: &'static str, index: u16 },
    /// A compile-time address, no pointer involved
    Direct(u16),
    /// A named cell accessed directly (pointer segment)
    Register(&'static str),
}

/// Resolve `segment index` to its addressing recipe
pub fn segment_access(segment: Segment, index: u16, ctx: &UnitContext) -> SegmentAccess {
    match segment {
        Segment::Constant => SegmentAccess::Immediate(index),
        Segment::Static => SegmentAccess::Static(ctx.static_symbol(index)),
        Segment::Local => SegmentAccess::Indirect { base: LCL, index },
        Segment::Argument => SegmentAccess::Indirect { base: ARG, index },
        Segment::This => SegmentAccess::Indirect { base: THIS, index },
        Segment::That => SegmentAccess::Indirect { base: THAT, index },
        Segment::Temp => SegmentAccess::Direct(TEMP_BASE + index),
        Segment::Pointer => SegmentAccess::Register(if index == 0 { THIS } else { THAT }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_recipes() {
        let ctx = UnitContext::new("Main");
        assert_eq!(segment_access(Segment::Constant, 9, &ctx), SegmentAccess::Immediate(9));
        assert_eq!(
            segment_access(Segment::Static, 3, &ctx),
            SegmentAccess::Static("Main.3".to_string())
        );
        assert_eq!(
            segment_access(Segment::Argument, 2, &ctx),
            SegmentAccess::Indirect { base: ARG, index: 2 }
        );
        assert_eq!(segment_access(Segment::Temp, 7, &ctx), SegmentAccess::Direct(12));
        assert_eq!(segment_access(Segment::Pointer, 0, &ctx), SegmentAccess::Register(THIS));
        assert_eq!(segment_access(Segment::Pointer, 1, &ctx), SegmentAccess::Register(THAT));
    }
}
