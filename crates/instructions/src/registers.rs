//! Register file layout. R0 through R4 are general purpose; the top three registers are reserved
//! by convention and no implemented opcode touches them.

pub const NUM_REGISTERS: usize = 8;

/// R5: interrupt mask.
pub const REG_INTERRUPT_MASK: usize = 5;
/// R6: interrupt status.
pub const REG_INTERRUPT_STATUS: usize = 6;
/// R7: stack pointer.
pub const REG_STACK_POINTER: usize = 7;

// Flags register bits, `0b00000LGE`. Set by a compare instruction on real hardware.
pub const FL_LESS: u8 = 0b100;
pub const FL_GREATER: u8 = 0b010;
pub const FL_EQUAL: u8 = 0b001;
