//! Host-side description of the LS8 instruction set: opcodes, the operand-count encoding
//! and the fixed layout of the register file.

use strum_macros::{Display, EnumCount, EnumIter, FromRepr};

pub mod instruction;
pub mod registers;

/// Number of addressable bytes of memory.
pub const MEMORY_SIZE: usize = 256;

/// Largest number of operand bytes an opcode can declare.
pub const MAX_OPERANDS: usize = 3;

const OPERAND_COUNT_SHIFT: u8 = 6;
const OPERAND_COUNT_MASK: u8 = 0b11;

/// Number of operand bytes following `byte` in the instruction stream. Encoded in the top two
/// bits, so this is defined for every byte, not only for known opcodes.
#[inline]
pub fn num_operands(byte: u8) -> usize {
    ((byte >> OPERAND_COUNT_SHIFT) & OPERAND_COUNT_MASK) as usize
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCount, EnumIter, FromRepr, Display,
)]
#[repr(u8)]
pub enum Opcode {
    /// Halt the machine.
    HLT = 0x01,
    /// `LDI reg, imm`: load an immediate into a register.
    LDI = 0x82,
    /// `PRN reg`: print the decimal value of a register.
    PRN = 0x47,
    /// `MUL reg_a, reg_b`: `reg_a = reg_a * reg_b`, wrapping at 8 bits.
    MUL = 0xA2,
}

impl Opcode {
    /// Decodes an opcode byte. Returns `None` for bytes outside the instruction set.
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::from_repr(byte)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn num_operands(self) -> usize {
        num_operands(self.as_u8())
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode.as_u8()
    }
}
