use std::io::{Stdout, Write};

use itertools::Itertools;
use ls8_instructions::{instruction::Instruction, Opcode, MAX_OPERANDS};

use super::{
    execution::PcIncOrSet, ExecutionError, ExecutionState, MachineConfig, MachineStatus, Result,
};
use crate::system::{
    memory::{Memory, MemoryError},
    registers::RegisterFile,
};

/// An LS8 machine. PRN output goes to `W`.
#[derive(Debug)]
pub struct Machine<W = Stdout> {
    config: MachineConfig,
    memory: Memory,
    registers: RegisterFile,
    /// Flags register. No implemented opcode sets it.
    flags: u8,
    pc: usize,
    status: MachineStatus,
    cycles: u64,
    output: W,
}

impl<W: Write> Machine<W> {
    pub fn new(output: W) -> Self {
        Self::with_config(MachineConfig::default(), output)
    }

    pub fn with_config(config: MachineConfig, output: W) -> Self {
        Self {
            config,
            memory: Memory::new(),
            registers: RegisterFile::default(),
            flags: 0,
            pc: config.load_address as usize,
            status: MachineStatus::Running,
            cycles: 0,
            output,
        }
    }

    /// Writes `program` into memory at the configured load address.
    pub fn load(&mut self, program: &[u8]) -> std::result::Result<(), MemoryError> {
        let address = self.config.load_address as usize;
        self.memory.load(address, program)?;
        tracing::debug!(address, len = program.len(), "loaded program");
        Ok(())
    }

    /// Runs until the machine halts. An error stops the loop and leaves the machine in the
    /// state it had when the failing instruction was fetched.
    pub fn run(&mut self) -> Result<ExecutionState> {
        tracing::debug!(pc = self.pc, "running");
        while self.status == MachineStatus::Running {
            self.step()?;
        }
        Ok(ExecutionState::new(self.pc, self.cycles))
    }

    /// Executes exactly one instruction.
    pub fn step(&mut self) -> Result<MachineStatus> {
        if self.status == MachineStatus::Halted {
            return Err(ExecutionError::Halted);
        }
        if self.config.trace {
            tracing::info!("{}", self.trace_line());
        }

        let pc = self.pc;
        let instruction = self.fetch(pc)?;
        tracing::trace!("pc: {pc:#04x} | cycle: {} | {instruction}", self.cycles);

        let next = self.execute(pc, &instruction)?;
        self.cycles += 1;
        self.advance(pc, instruction.size(), next);
        Ok(self.status)
    }

    /// Applies a handler's decision for the instruction of `size` bytes at `pc`.
    pub(crate) fn advance(&mut self, pc: usize, size: usize, next: PcIncOrSet) {
        match next {
            PcIncOrSet::Inc => self.pc = pc + size,
            PcIncOrSet::Set(target) => self.pc = target,
            PcIncOrSet::Halt => {
                self.status = MachineStatus::Halted;
                tracing::debug!(pc, cycles = self.cycles, "halted");
            }
        }
    }

    fn fetch(&self, pc: usize) -> Result<Instruction> {
        let byte = self.read_memory(pc, pc)?;
        let opcode =
            Opcode::from_u8(byte).ok_or(ExecutionError::IllegalInstruction { pc, opcode: byte })?;
        let mut operands = [0; MAX_OPERANDS];
        for (i, operand) in operands
            .iter_mut()
            .take(opcode.num_operands())
            .enumerate()
        {
            *operand = self.read_memory(pc, pc + 1 + i)?;
        }
        Ok(Instruction::new(opcode, operands))
    }

    fn execute(&mut self, pc: usize, instruction: &Instruction) -> Result<PcIncOrSet> {
        match instruction.opcode {
            Opcode::HLT => Ok(PcIncOrSet::Halt),
            Opcode::LDI => {
                *self.register_mut(pc, instruction.a())? = instruction.b();
                Ok(PcIncOrSet::Inc)
            }
            Opcode::PRN => {
                let value = self.register(pc, instruction.a())?;
                writeln!(self.output, "{value}")
                    .map_err(|source| ExecutionError::Output { pc, source })?;
                Ok(PcIncOrSet::Inc)
            }
            Opcode::MUL => {
                let rhs = self.register(pc, instruction.b())?;
                let lhs = self.register_mut(pc, instruction.a())?;
                *lhs = lhs.wrapping_mul(rhs);
                Ok(PcIncOrSet::Inc)
            }
        }
    }

    fn read_memory(&self, pc: usize, address: usize) -> Result<u8> {
        self.memory
            .read(address)
            .map_err(|source| ExecutionError::Memory { pc, source })
    }

    fn register(&self, pc: usize, index: u8) -> Result<u8> {
        self.registers
            .get(index)
            .ok_or(ExecutionError::InvalidRegister { pc, index })
    }

    fn register_mut(&mut self, pc: usize, index: u8) -> Result<&mut u8> {
        self.registers
            .get_mut(index)
            .ok_or(ExecutionError::InvalidRegister { pc, index })
    }

    /// `TRACE: PC | B0 B1 B2 | R0 .. R7`, all in two-digit hex. Bytes past the end of memory
    /// print as `--`.
    pub fn trace_line(&self) -> String {
        let bytes = (self.pc..self.pc + 3)
            .map(|address| match self.memory.read(address) {
                Ok(byte) => format!("{byte:02X}"),
                Err(_) => "--".to_string(),
            })
            .join(" ");
        let registers = self
            .registers
            .as_array()
            .iter()
            .map(|r| format!("{r:02X}"))
            .join(" ");
        format!("TRACE: {:02X} | {bytes} | {registers}", self.pc)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Value of register `index`, or `None` if there is no such register.
    pub fn register_value(&self, index: u8) -> Option<u8> {
        self.registers.get(index)
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
