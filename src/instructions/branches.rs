//! # Branch Instructions
//!
//! This module implements the relative branches:
//! - BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS: branch on a status flag
//! - BRA (65c02): branch always
//! - BBR0-7 / BBS0-7 (65c02): branch on a zero page bit being reset / set
//!
//! A branch first steps PC past itself, then, if taken, adds the displacement
//! as a two's complement signed byte with 16-bit wrap. No flags are affected.

use crate::addressing::AddressingMode;
use crate::opcodes::Handler;
use crate::{MemoryBus, Status, CPU};

fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, displacement: u8, taken: bool) {
    cpu.advance(mode);

    if taken {
        cpu.pc = cpu.pc.wrapping_add_signed(displacement as i8 as i16);
    }
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn execute_bcc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = !cpu.status.contains(Status::CARRY);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = cpu.status.contains(Status::CARRY);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = cpu.status.contains(Status::ZERO);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = !cpu.status.contains(Status::ZERO);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn execute_bmi<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = cpu.status.contains(Status::NEGATIVE);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BPL (Branch if Positive) instruction.
pub(crate) fn execute_bpl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = !cpu.status.contains(Status::NEGATIVE);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn execute_bvc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = !cpu.status.contains(Status::OVERFLOW);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn execute_bvs<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let taken = cpu.status.contains(Status::OVERFLOW);
    branch_if(cpu, mode, operand as u8, taken);
}

/// Executes the BRA (Branch Always) instruction.
pub(crate) fn execute_bra<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    branch_if(cpu, mode, operand as u8, true);
}

/// Tests bit `BIT` of a zero page byte and branches if it equals `SET`.
///
/// The operand word carries the zero page address in its low byte and the
/// displacement in its high byte, in encoding order.
fn execute_bit_branch<M: MemoryBus, const BIT: u8, const SET: bool>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    operand: u16,
) {
    let value = cpu.memory.read(operand & 0x00FF);
    let displacement = (operand >> 8) as u8;
    let is_set = value & (1 << BIT) != 0;

    branch_if(cpu, mode, displacement, is_set == SET);
}

/// BBRn handler for `bit`.
pub(crate) fn branch_on_reset<M: MemoryBus>(bit: u8) -> Handler<M> {
    let handlers: [Handler<M>; 8] = [
        execute_bit_branch::<M, 0, false>,
        execute_bit_branch::<M, 1, false>,
        execute_bit_branch::<M, 2, false>,
        execute_bit_branch::<M, 3, false>,
        execute_bit_branch::<M, 4, false>,
        execute_bit_branch::<M, 5, false>,
        execute_bit_branch::<M, 6, false>,
        execute_bit_branch::<M, 7, false>,
    ];
    handlers[(bit & 0x07) as usize]
}

/// BBSn handler for `bit`.
pub(crate) fn branch_on_set<M: MemoryBus>(bit: u8) -> Handler<M> {
    let handlers: [Handler<M>; 8] = [
        execute_bit_branch::<M, 0, true>,
        execute_bit_branch::<M, 1, true>,
        execute_bit_branch::<M, 2, true>,
        execute_bit_branch::<M, 3, true>,
        execute_bit_branch::<M, 4, true>,
        execute_bit_branch::<M, 5, true>,
        execute_bit_branch::<M, 6, true>,
        execute_bit_branch::<M, 7, true>,
    ];
    handlers[(bit & 0x07) as usize]
}
