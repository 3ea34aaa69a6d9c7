use crate::{Opcode, MAX_OPERANDS};

/// A decoded instruction. Operand slots past `opcode.num_operands()` are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_new::new)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: [u8; MAX_OPERANDS],
}

impl Instruction {
    pub fn hlt() -> Self {
        Self::new(Opcode::HLT, [0; MAX_OPERANDS])
    }

    pub fn ldi(reg: u8, imm: u8) -> Self {
        Self::new(Opcode::LDI, [reg, imm, 0])
    }

    pub fn prn(reg: u8) -> Self {
        Self::new(Opcode::PRN, [reg, 0, 0])
    }

    pub fn mul(reg_a: u8, reg_b: u8) -> Self {
        Self::new(Opcode::MUL, [reg_a, reg_b, 0])
    }

    pub fn a(&self) -> u8 {
        self.operands[0]
    }

    pub fn b(&self) -> u8 {
        self.operands[1]
    }

    /// The operand bytes actually present in the instruction stream.
    pub fn operand_bytes(&self) -> &[u8] {
        &self.operands[..self.opcode.num_operands()]
    }

    /// Size in bytes of the encoded instruction.
    pub fn size(&self) -> usize {
        1 + self.opcode.num_operands()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        bytes.push(self.opcode.as_u8());
        bytes.extend_from_slice(self.operand_bytes());
        bytes
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (i, operand) in self.operand_bytes().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand:#04x}")?;
        }
        Ok(())
    }
}

/// Concatenates the encodings of `instructions` into a program image.
pub fn encode_program(instructions: &[Instruction]) -> Vec<u8> {
    instructions.iter().flat_map(Instruction::to_bytes).collect()
}
