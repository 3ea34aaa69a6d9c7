use ls8_instructions::{
    instruction::{encode_program, Instruction},
    registers::NUM_REGISTERS,
    MEMORY_SIZE,
};
use test_case::test_case;

use super::execution::PcIncOrSet;
use crate::{
    arch::{ExecutionError, ExecutionState, Machine, MachineConfig, MachineStatus},
    system::memory::MemoryError,
};

fn machine_with(program: &[Instruction]) -> Machine<Vec<u8>> {
    let mut machine = Machine::new(Vec::<u8>::new());
    machine.load(&encode_program(program)).unwrap();
    machine
}

fn printed(machine: Machine<Vec<u8>>) -> String {
    String::from_utf8(machine.into_output()).unwrap()
}

#[test]
fn test_fresh_machine() {
    let machine = Machine::new(Vec::<u8>::new());
    assert_eq!(machine.pc(), 0);
    assert_eq!(machine.status(), MachineStatus::Running);
    assert_eq!(machine.registers().as_array(), &[0; NUM_REGISTERS]);
    assert_eq!(machine.flags(), 0);
    assert_eq!(machine.cycles(), 0);
}

#[test_case(0, 8)]
#[test_case(4, 0xFF)]
#[test_case(7, 0)]
fn test_ldi(reg: u8, imm: u8) {
    let mut machine = machine_with(&[Instruction::ldi(reg, imm), Instruction::hlt()]);
    assert_eq!(machine.step().unwrap(), MachineStatus::Running);
    assert_eq!(machine.register_value(reg), Some(imm));
    assert_eq!(machine.pc(), 3);
}

#[test]
fn test_ldi_at_nonzero_pc() {
    let config = MachineConfig::default().with_load_address(0x10);
    let mut machine = Machine::with_config(config, Vec::<u8>::new());
    machine.load(&Instruction::ldi(2, 0x33).to_bytes()).unwrap();
    assert_eq!(machine.pc(), 0x10);
    machine.step().unwrap();
    assert_eq!(machine.register_value(2), Some(0x33));
    assert_eq!(machine.pc(), 0x13);
}

#[test]
fn test_prn() {
    let mut machine = machine_with(&[
        Instruction::ldi(3, 42),
        Instruction::prn(3),
        Instruction::hlt(),
    ]);
    machine.run().unwrap();
    assert_eq!(printed(machine), "42\n");
}

#[test_case(200, 5, 232 ; "wraps")]
#[test_case(9, 3, 27 ; "small")]
#[test_case(16, 16, 0 ; "wraps to zero")]
#[test_case(255, 255, 1 ; "max")]
fn test_mul(lhs: u8, rhs: u8, expected: u8) {
    let mut machine = machine_with(&[
        Instruction::ldi(0, lhs),
        Instruction::ldi(1, rhs),
        Instruction::mul(0, 1),
        Instruction::hlt(),
    ]);
    machine.run().unwrap();
    assert_eq!(machine.register_value(0), Some(expected));
    assert_eq!(machine.register_value(1), Some(rhs));
}

#[test]
fn test_mul_same_register() {
    let mut machine = machine_with(&[
        Instruction::ldi(2, 12),
        Instruction::mul(2, 2),
        Instruction::hlt(),
    ]);
    machine.run().unwrap();
    assert_eq!(machine.register_value(2), Some(144));
}

#[test]
fn test_hlt_stops_execution() {
    let mut machine = machine_with(&[
        Instruction::hlt(),
        Instruction::ldi(0, 1),
        Instruction::prn(0),
    ]);
    let state = machine.run().unwrap();
    assert_eq!(state, ExecutionState::new(0, 1));
    assert_eq!(machine.status(), MachineStatus::Halted);
    assert_eq!(machine.register_value(0), Some(0));
    assert!(matches!(machine.step(), Err(ExecutionError::Halted)));
    // Running a halted machine again is a no-op.
    assert_eq!(machine.run().unwrap(), state);
    assert_eq!(printed(machine), "");
}

#[test_case(0xFF)]
#[test_case(0x00)]
#[test_case(0x45)]
fn test_illegal_instruction(opcode: u8) {
    let mut machine = Machine::new(Vec::<u8>::new());
    machine.load(&[0x82, 0x00, 0x01, opcode]).unwrap();
    let err = machine.run().unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::IllegalInstruction { pc: 3, opcode: op } if op == opcode
    ));
    assert_eq!(machine.status(), MachineStatus::Running);
    assert_eq!(machine.pc(), 3);
    assert_eq!(machine.register_value(0), Some(1));
}

#[test]
fn test_empty_memory_is_illegal() {
    let mut machine = Machine::new(Vec::<u8>::new());
    assert!(matches!(
        machine.run(),
        Err(ExecutionError::IllegalInstruction { pc: 0, opcode: 0 })
    ));
}

#[test_case(Instruction::ldi(8, 1) ; "ldi")]
#[test_case(Instruction::prn(0xFF) ; "prn")]
#[test_case(Instruction::mul(0, 9) ; "mul rhs")]
#[test_case(Instruction::mul(9, 0) ; "mul lhs")]
fn test_invalid_register(instruction: Instruction) {
    let mut machine = machine_with(&[instruction, Instruction::hlt()]);
    let err = machine.run().unwrap_err();
    assert!(matches!(err, ExecutionError::InvalidRegister { pc: 0, .. }));
    assert_eq!(machine.pc(), 0);
    assert_eq!(machine.registers().as_array(), &[0; NUM_REGISTERS]);
}

#[test]
fn test_operand_past_end_of_memory() {
    let config = MachineConfig::default().with_load_address((MEMORY_SIZE - 2) as u8);
    let mut machine = Machine::with_config(config, Vec::<u8>::new());
    machine.load(&[0x82, 0x00]).unwrap();
    let err = machine.run().unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::Memory {
            pc: 254,
            source: MemoryError::OutOfBounds { address: 256 },
        }
    ));
}

#[test]
fn test_pc_runs_off_end_of_memory() {
    // LDI in the last three cells leaves the pc at 256.
    let config = MachineConfig::default().with_load_address((MEMORY_SIZE - 3) as u8);
    let mut machine = Machine::with_config(config, Vec::<u8>::new());
    machine.load(&Instruction::ldi(0, 7).to_bytes()).unwrap();
    let err = machine.run().unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::Memory {
            pc: 256,
            source: MemoryError::OutOfBounds { address: 256 },
        }
    ));
    assert_eq!(machine.register_value(0), Some(7));
}

#[test]
fn test_program_too_large() {
    let mut machine = Machine::new(Vec::<u8>::new());
    assert_eq!(
        machine.load(&[0x01; MEMORY_SIZE + 1]),
        Err(MemoryError::OutOfBounds {
            address: MEMORY_SIZE
        })
    );
}

#[test]
fn test_output_error() {
    struct FailingWriter;

    impl std::io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut machine = Machine::new(FailingWriter);
    machine
        .load(&encode_program(&[Instruction::prn(0), Instruction::hlt()]))
        .unwrap();
    let err = machine.run().unwrap_err();
    assert!(matches!(err, ExecutionError::Output { pc: 0, .. }));
}

#[test]
fn test_handler_sets_pc() {
    // LDI R0,5; HLT at 0x00 and PRN R0; HLT at 0x20.
    let mut program = encode_program(&[Instruction::ldi(0, 5), Instruction::hlt()]);
    program.resize(0x20, 0);
    program.extend(encode_program(&[Instruction::prn(0), Instruction::hlt()]));
    let mut machine = Machine::new(Vec::<u8>::new());
    machine.load(&program).unwrap();
    machine.step().unwrap();
    assert_eq!(machine.pc(), 3);

    machine.advance(3, 1, PcIncOrSet::Set(0x20));
    assert_eq!(machine.pc(), 0x20);
    assert_eq!(machine.status(), MachineStatus::Running);
    assert_eq!(machine.run().unwrap(), ExecutionState::new(0x22, 3));
    assert_eq!(printed(machine), "5\n");
}

#[test]
fn test_handler_inc_and_halt() {
    let mut machine = Machine::new(Vec::<u8>::new());
    machine.advance(4, 3, PcIncOrSet::Inc);
    assert_eq!(machine.pc(), 7);
    machine.advance(7, 1, PcIncOrSet::Halt);
    assert_eq!(machine.pc(), 7);
    assert_eq!(machine.status(), MachineStatus::Halted);
}

#[test]
fn test_trace_line() {
    let mut machine = machine_with(&[Instruction::ldi(0, 8), Instruction::hlt()]);
    assert_eq!(
        machine.trace_line(),
        "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 00"
    );
    machine.step().unwrap();
    assert_eq!(
        machine.trace_line(),
        "TRACE: 03 | 01 00 00 | 08 00 00 00 00 00 00 00"
    );
}

#[test]
fn test_trace_line_at_end_of_memory() {
    let config = MachineConfig::default().with_load_address(0xFE);
    let mut machine = Machine::with_config(config, Vec::<u8>::new());
    machine.load(&[0x01, 0x02]).unwrap();
    assert_eq!(
        machine.trace_line(),
        "TRACE: FE | 01 02 -- | 00 00 00 00 00 00 00 00"
    );
}

#[test]
fn test_tracing_does_not_change_execution() {
    let program = encode_program(&[
        Instruction::ldi(0, 9),
        Instruction::prn(0),
        Instruction::hlt(),
    ]);
    let config = MachineConfig::default().with_trace(true);
    let mut traced = Machine::with_config(config, Vec::<u8>::new());
    traced.load(&program).unwrap();
    let mut plain = Machine::new(Vec::<u8>::new());
    plain.load(&program).unwrap();

    assert_eq!(traced.run().unwrap(), plain.run().unwrap());
    assert_eq!(traced.into_output(), plain.into_output());
}

#[test]
fn test_reserved_registers_untouched() {
    let mut machine = machine_with(&[
        Instruction::ldi(0, 2),
        Instruction::ldi(1, 3),
        Instruction::mul(0, 1),
        Instruction::prn(0),
        Instruction::hlt(),
    ]);
    machine.run().unwrap();
    let registers = machine.registers();
    assert_eq!(registers.interrupt_mask(), 0);
    assert_eq!(registers.interrupt_status(), 0);
    assert_eq!(registers.stack_pointer(), 0);
    assert_eq!(machine.flags(), 0);
}

#[test]
fn test_config_from_toml() {
    let config: MachineConfig = toml::from_str("trace = true").unwrap();
    assert_eq!(config, MachineConfig::new(0, true));

    let config: MachineConfig = toml::from_str("load_address = 16\ntrace = false").unwrap();
    assert_eq!(config, MachineConfig::default().with_load_address(16));
}
