//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC: Clear Carry Flag
//! - SEC: Set Carry Flag
//! - CLI: Clear Interrupt Disable
//! - SEI: Set Interrupt Disable
//! - CLV: Clear Overflow Flag
//! - CLD: Clear Decimal Mode
//! - SED: Set Decimal Mode
//!
//! CLD and SED change the flag even when the `decimal_mode` feature is off;
//! only ADC and SBC consult the feature.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, Status, CPU};

fn assign<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, flag: Status, value: bool) {
    cpu.status.set(flag, value);
    cpu.advance(mode);
}

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::CARRY, false);
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::CARRY, true);
}

pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::INTERRUPT_DISABLE, false);
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::INTERRUPT_DISABLE, true);
}

/// There is no SEV; overflow is only ever set by ADC, SBC and BIT.
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::OVERFLOW, false);
}

pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::DECIMAL, false);
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    assign(cpu, mode, Status::DECIMAL, true);
}
