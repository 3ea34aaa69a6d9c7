mod config;
mod execution;
mod vm;

pub use config::*;
pub use execution::{ExecutionError, ExecutionState, MachineStatus, Result};
pub use vm::*;

#[cfg(test)]
mod tests;
