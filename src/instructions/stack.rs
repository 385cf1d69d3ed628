//! # Stack Instructions
//!
//! This module implements stack operations:
//! - PHA / PLA: push / pull the accumulator
//! - PHP / PLP: push / pull the status register
//! - PHX / PLX / PHY / PLY (65c02): push / pull an index register
//!
//! The stack lives at 0x0100-0x01FF. Pushes write at `0x0100 + SP` and then
//! decrement SP; pulls increment SP and then read. SP wraps freely.
//!
//! Pulls into a register update Z and N. PHP pushes the status with Break
//! set and bit 5 clear; PLP drops both bits again.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, Status, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.push(cpu.a);
    cpu.advance(mode);
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.push(cpu.status.to_pushed());
    cpu.advance(mode);
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.a = cpu.pull();
    cpu.set_zn(cpu.a);
    cpu.advance(mode);
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    let byte = cpu.pull();
    cpu.status = Status::from_pulled(byte);
    cpu.advance(mode);
}

pub(crate) fn execute_phx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.push(cpu.x);
    cpu.advance(mode);
}

pub(crate) fn execute_plx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.x = cpu.pull();
    cpu.set_zn(cpu.x);
    cpu.advance(mode);
}

pub(crate) fn execute_phy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.push(cpu.y);
    cpu.advance(mode);
}

pub(crate) fn execute_ply<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.y = cpu.pull();
    cpu.set_zn(cpu.y);
    cpu.advance(mode);
}
