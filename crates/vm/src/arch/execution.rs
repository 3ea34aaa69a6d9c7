use std::io;

use thiserror::Error;

use crate::system::memory::MemoryError;

pub type Result<T> = std::result::Result<T, ExecutionError>;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("memory access failed at pc = {pc:#04x}")]
    Memory {
        pc: usize,
        #[source]
        source: MemoryError,
    },

    #[error("illegal instruction {opcode:#04x} at pc = {pc:#04x}")]
    IllegalInstruction { pc: usize, opcode: u8 },

    #[error("register index {index} out of range at pc = {pc:#04x}")]
    InvalidRegister { pc: usize, index: u8 },

    #[error("failed to write output at pc = {pc:#04x}")]
    Output {
        pc: usize,
        #[source]
        source: io::Error,
    },

    #[error("machine is halted")]
    Halted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MachineStatus {
    #[default]
    Running,
    Halted,
}

/// Where execution is after a run: the pc of the halting instruction and the number of
/// instructions executed in total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_new::new)]
pub struct ExecutionState {
    pub pc: usize,
    pub cycles: u64,
}

/// What an instruction handler asks the loop to do with the pc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PcIncOrSet {
    /// Step past the instruction and its operands.
    Inc,
    /// The handler chose the next pc. No implemented opcode jumps yet.
    #[cfg_attr(not(test), allow(dead_code))]
    Set(usize),
    Halt,
}
