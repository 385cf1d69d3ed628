//! # Compare and Test Instructions
//!
//! - CMP, CPX, CPY: unsigned register/operand comparison
//! - BIT: test accumulator bits against memory
//! - TSB, TRB (65c02): test and set / reset memory bits
//!
//! The compares behave as a subtraction whose result is thrown away:
//! C is set when the register is greater than or equal to the operand, Z when
//! both are equal, and N takes bit 7 of the 8-bit difference.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, Status, CPU};

fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);

    cpu.set_flag_c(register >= value);
    cpu.set_zn(register.wrapping_sub(value));
    cpu.advance(mode);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let register = cpu.a;
    compare(cpu, register, mode, operand);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let register = cpu.x;
    compare(cpu, register, mode, operand);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let register = cpu.y;
    compare(cpu, register, mode, operand);
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set when `A & M` is zero. V and N copy bits 6 and 7 of the operand
/// itself, not of the AND result. The 65c02 immediate form has no memory
/// operand to copy from and updates Z only.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);

    cpu.set_flag_z(cpu.a & value == 0);

    if mode != AddressingMode::Immediate {
        cpu.status.set(Status::OVERFLOW, value & 0x40 != 0);
        cpu.status.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    cpu.advance(mode);
}

/// Executes the TSB (Test and Set Bits) instruction.
///
/// Z reflects `A & M` before the write, then `M |= A`.
pub(crate) fn execute_tsb<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    cpu.modify(mode, operand, |cpu, value| {
        cpu.set_flag_z(cpu.a & value == 0);
        value | cpu.a
    });

    cpu.advance(mode);
}

/// Executes the TRB (Test and Reset Bits) instruction.
///
/// Z reflects `A & M` before the write, then `M &= !A`.
pub(crate) fn execute_trb<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    cpu.modify(mode, operand, |cpu, value| {
        cpu.set_flag_z(cpu.a & value == 0);
        value & !cpu.a
    });

    cpu.advance(mode);
}
