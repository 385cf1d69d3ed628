//! # Increment and Decrement Instructions
//!
//! - INC, DEC: memory, or the accumulator on the 65c02 (`INC A`, `DEC A`)
//! - INX, INY, DEX, DEY: index registers
//!
//! All wrap at 8 bits and update Z and N. Carry is never touched.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let result = cpu.modify(mode, operand, |_, value| value.wrapping_add(1));
    cpu.set_zn(result);
    cpu.advance(mode);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let result = cpu.modify(mode, operand, |_, value| value.wrapping_sub(1));
    cpu.set_zn(result);
    cpu.advance(mode);
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
    cpu.advance(mode);
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
    cpu.advance(mode);
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
    cpu.advance(mode);
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
    cpu.advance(mode);
}
