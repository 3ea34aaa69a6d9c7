use ls8_instructions::registers::{
    NUM_REGISTERS, REG_INTERRUPT_MASK, REG_INTERRUPT_STATUS, REG_STACK_POINTER,
};

/// The eight 8-bit general purpose registers. Indices come straight from the instruction
/// stream, so accessors return `None` instead of panicking on a bad index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile([u8; NUM_REGISTERS]);

impl RegisterFile {
    pub fn get(&self, index: u8) -> Option<u8> {
        self.0.get(index as usize).copied()
    }

    pub fn get_mut(&mut self, index: u8) -> Option<&mut u8> {
        self.0.get_mut(index as usize)
    }

    pub fn as_array(&self) -> &[u8; NUM_REGISTERS] {
        &self.0
    }

    pub fn interrupt_mask(&self) -> u8 {
        self.0[REG_INTERRUPT_MASK]
    }

    pub fn interrupt_status(&self) -> u8 {
        self.0[REG_INTERRUPT_STATUS]
    }

    pub fn stack_pointer(&self) -> u8 {
        self.0[REG_STACK_POINTER]
    }
}
