//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left
//! - ROR: Rotate Right
//!
//! All four work in place on the accumulator or a memory location and update
//! C, Z and N.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 7 goes to carry, bit 0 becomes 0.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let result = cpu.modify(mode, operand, |cpu, value| {
        cpu.set_flag_c(value & 0x80 != 0);
        value << 1
    });

    cpu.set_zn(result);
    cpu.advance(mode);
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 0 goes to carry, bit 7 becomes 0, so N always ends up clear.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let result = cpu.modify(mode, operand, |cpu, value| {
        cpu.set_flag_c(value & 0x01 != 0);
        value >> 1
    });

    cpu.set_zn(result);
    cpu.advance(mode);
}

/// Executes the ROL (Rotate Left) instruction.
///
/// Bit 7 goes to carry and the old carry enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let result = cpu.modify(mode, operand, |cpu, value| {
        let carry_in = cpu.flag_c() as u8;
        cpu.set_flag_c(value & 0x80 != 0);
        (value << 1) | carry_in
    });

    cpu.set_zn(result);
    cpu.advance(mode);
}

/// Executes the ROR (Rotate Right) instruction.
///
/// Bit 0 goes to carry and the old carry enters bit 7.
///
/// With the `ror_bug` feature the early silicon is reproduced instead: the
/// value is shifted left, bit 0 becomes 0 and carry is cleared.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let ror_bug = cpu.features.ror_bug;

    let result = cpu.modify(mode, operand, |cpu, value| {
        if ror_bug {
            cpu.set_flag_c(false);
            return value << 1;
        }

        let carry_in = cpu.flag_c() as u8;
        cpu.set_flag_c(value & 0x01 != 0);
        (value >> 1) | (carry_in << 7)
    });

    cpu.set_zn(result);
    cpu.advance(mode);
}
