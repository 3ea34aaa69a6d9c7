//! The LS8 machine. [`arch::Machine`] owns a [`system::memory::Memory`] and a
//! [`system::registers::RegisterFile`] and runs the fetch-decode-execute loop over them.

pub mod arch;
pub mod system;

pub use ls8_instructions as instructions;
