//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: absolute, indirect and (65c02) absolute indexed indirect
//! - JSR / RTS: subroutine call and return
//! - BRK / RTI: software interrupt and return
//! - NOP
//!
//! JSR pushes the address of its own last byte (PC+2), high byte first, and
//! RTS adds one to the pulled address. BRK follows the same convention: it is
//! treated as a two byte instruction (opcode plus a padding byte) and pushes
//! PC+1, so RTI adds one as well and execution resumes after the padding byte.

use crate::addressing::{self, AddressingMode};
use crate::cpu::IRQ_VECTOR;
use crate::{MemoryBus, Status, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): `JMP $1234`
/// - Indirect (0x6C): `JMP ($1234)`, subject to the `indirect_jump_bug` page wrap
/// - Absolute indexed indirect (0x7C, 65c02): `JMP ($1234,X)`
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    cpu.pc = cpu.effective_address(mode, operand);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes PC+2 (high, then low) and jumps to the operand.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, _mode: AddressingMode, operand: u16) {
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_word(return_address);
    cpu.pc = operand;
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address (low, then high) and adds one.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>, _mode: AddressingMode, _operand: u16) {
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// 1. Pushes PC+1 (high byte, then low byte)
/// 2. Pushes the status with B set and bit 5 clear
/// 3. Sets B and I in the live register
/// 4. Loads PC from the IRQ vector at $FFFE/F
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>, _mode: AddressingMode, _operand: u16) {
    let return_address = cpu.pc.wrapping_add(1);
    cpu.push_word(return_address);
    cpu.push(cpu.status.to_pushed());

    cpu.status.insert(Status::BREAK | Status::INTERRUPT_DISABLE);
    cpu.pc = addressing::read_word(&cpu.memory, IRQ_VECTOR);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status (B and bit 5 dropped), then the return address (low,
/// then high), and adds one to it.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>, _mode: AddressingMode, _operand: u16) {
    let byte = cpu.pull();
    cpu.status = Status::from_pulled(byte);
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.advance(mode);
}
