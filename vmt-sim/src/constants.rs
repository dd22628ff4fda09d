//! Hack platform memory map

pub const RAM_SIZE: usize = 32768;
pub const SCREEN: u16 = 16384;
pub const KBD: u16 = 24576;

/// First RAM address handed out to assembler variables
pub const VARIABLE_BASE: u16 = 16;

/// Largest value an address instruction can hold
pub const MAX_ADDRESS_CONSTANT: u16 = 0x7FFF;

/// Predefined symbols other than R0-R15
pub const PREDEFINED: [(&str, u16); 7] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("SCREEN", SCREEN),
    ("KBD", KBD),
];
