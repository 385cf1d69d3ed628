//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy one register into another and update Z
//! and N. TXS copies X into the stack pointer and leaves the flags alone.

use crate::addressing::AddressingMode;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
    cpu.advance(mode);
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
    cpu.advance(mode);
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
    cpu.advance(mode);
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
    cpu.advance(mode);
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.x = cpu.sp;
    cpu.set_zn(cpu.x);
    cpu.advance(mode);
}

/// No flags: TXS is the one transfer that does not touch Z/N.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, _operand: u16) {
    cpu.sp = cpu.x;
    cpu.advance(mode);
}
