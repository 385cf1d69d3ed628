//! # Logic Instructions
//!
//! - AND: Logical AND
//! - ORA: Logical Inclusive OR
//! - EOR: Exclusive OR
//!
//! Each combines the accumulator with the operand, stores the result in A
//! and updates Z and N from it.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, CPU};

fn accumulate<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    operand: u16,
    op: fn(u8, u8) -> u8,
) {
    let value = cpu.operand_value(mode, operand);
    let result = op(cpu.a, value);

    cpu.a = result;
    cpu.set_zn(result);
    cpu.advance(mode);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    accumulate(cpu, mode, operand, |a, m| a & m);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    accumulate(cpu, mode, operand, |a, m| a | m);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    accumulate(cpu, mode, operand, |a, m| a ^ m);
}
