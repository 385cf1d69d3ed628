//! # Load and Store Instructions
//!
//! This module implements memory transfer operations:
//! - LDA, LDX, LDY: load a register, update Z and N
//! - STA, STX, STY: store a register, no flags
//! - STZ (65c02): store zero, no flags

use crate::addressing::AddressingMode;
use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);
    cpu.a = value;
    cpu.set_zn(value);
    cpu.advance(mode);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);
    cpu.x = value;
    cpu.set_zn(value);
    cpu.advance(mode);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);
    cpu.y = value;
    cpu.set_zn(value);
    cpu.advance(mode);
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, value: u8, mode: AddressingMode, operand: u16) {
    let addr = cpu.effective_address(mode, operand);
    cpu.memory.write(addr, value);
    cpu.advance(mode);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.a;
    store(cpu, value, mode, operand);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.x;
    store(cpu, value, mode, operand);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.y;
    store(cpu, value, mode, operand);
}

/// Executes the STZ (Store Zero) instruction.
pub(crate) fn execute_stz<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    store(cpu, 0x00, mode, operand);
}
