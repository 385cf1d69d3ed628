//! # Zero Page Bit Instructions (65c02)
//!
//! - RMB0-7: reset bit n of a zero page byte
//! - SMB0-7: set bit n of a zero page byte
//!
//! No flags are affected. One generic body per operation is instantiated for
//! each bit index.

use crate::addressing::AddressingMode;
use crate::opcodes::Handler;
use crate::{MemoryBus, CPU};

fn execute_rmb<M: MemoryBus, const BIT: u8>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    operand: u16,
) {
    cpu.modify(mode, operand, |_, value| value & !(1 << BIT));
    cpu.advance(mode);
}

fn execute_smb<M: MemoryBus, const BIT: u8>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    operand: u16,
) {
    cpu.modify(mode, operand, |_, value| value | (1 << BIT));
    cpu.advance(mode);
}

/// RMBn handler for `bit`.
pub(crate) fn reset_bit<M: MemoryBus>(bit: u8) -> Handler<M> {
    let handlers: [Handler<M>; 8] = [
        execute_rmb::<M, 0>,
        execute_rmb::<M, 1>,
        execute_rmb::<M, 2>,
        execute_rmb::<M, 3>,
        execute_rmb::<M, 4>,
        execute_rmb::<M, 5>,
        execute_rmb::<M, 6>,
        execute_rmb::<M, 7>,
    ];
    handlers[(bit & 0x07) as usize]
}

/// SMBn handler for `bit`.
pub(crate) fn set_bit<M: MemoryBus>(bit: u8) -> Handler<M> {
    let handlers: [Handler<M>; 8] = [
        execute_smb::<M, 0>,
        execute_smb::<M, 1>,
        execute_smb::<M, 2>,
        execute_smb::<M, 3>,
        execute_smb::<M, 4>,
        execute_smb::<M, 5>,
        execute_smb::<M, 6>,
        execute_smb::<M, 7>,
    ];
    handlers[(bit & 0x07) as usize]
}
