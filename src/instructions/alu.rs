//! # Arithmetic Instructions
//!
//! This module implements the two arithmetic operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry (borrow = !C)
//!
//! Both exist as pure functions over the accumulator, operand and status so
//! every addressing variant shares one body.
//!
//! ## Decimal mode
//!
//! When D is set and the `decimal_mode` feature is on, operands are treated
//! as packed BCD and corrected nibble by nibble. Invalid BCD digits are not
//! rejected; the correction is applied blindly and each nibble is masked back
//! to 4 bits, as on the hardware.
//!
//! On the NMOS part Z, N and V after a decimal operation describe the binary
//! result rather than the corrected one. The `decimal_flags_bug` feature
//! reproduces that; with it off the flags describe the BCD result.

use crate::addressing::AddressingMode;
use crate::{Features, MemoryBus, Status, CPU};

/// Adds `m` and the carry to `a`.
///
/// Returns the new accumulator and `status` with C, Z, V and N replaced.
///
/// # Examples
///
/// ```
/// use lib65x02::{add_with_carry, Features, Status};
///
/// let (a, p) = add_with_carry(0x50, 0x50, Status::empty(), &Features::nmos());
/// assert_eq!(a, 0xA0);
/// assert!(p.contains(Status::OVERFLOW | Status::NEGATIVE));
/// assert!(!p.contains(Status::CARRY));
///
/// // 0x19 + 0x28 = 0x47 in BCD
/// let (a, _) = add_with_carry(0x19, 0x28, Status::DECIMAL, &Features::nmos());
/// assert_eq!(a, 0x47);
/// ```
pub fn add_with_carry(a: u8, m: u8, status: Status, features: &Features) -> (u8, Status) {
    let carry_in = status.contains(Status::CARRY) as u16;

    let sum = a as u16 + m as u16 + carry_in;
    let binary = sum as u8;
    let binary_overflow = (a ^ binary) & (m ^ binary) & 0x80 != 0;

    if !(features.decimal_mode && status.contains(Status::DECIMAL)) {
        return (
            binary,
            with_arithmetic_flags(status, binary, sum > 0xFF, binary_overflow),
        );
    }

    let mut low = (a & 0x0F) as u16 + (m & 0x0F) as u16 + carry_in;
    let mut low_carry = 0;
    if low > 9 {
        low = (low + 6) & 0x0F;
        low_carry = 1;
    }

    let mut high = (a >> 4) as u16 + (m >> 4) as u16 + low_carry;
    let mut high_carry = false;
    if high > 9 {
        high = (high + 6) & 0x0F;
        high_carry = true;
    }

    let bcd = ((high << 4) | low) as u8;

    let status = if features.decimal_flags_bug {
        with_arithmetic_flags(status, binary, high_carry, binary_overflow)
    } else {
        let overflow = (a ^ bcd) & (m ^ bcd) & 0x80 != 0;
        with_arithmetic_flags(status, bcd, high_carry, overflow)
    };

    (bcd, status)
}

/// Subtracts `m` and the borrow (`!C`) from `a`.
///
/// C is set afterwards iff no borrow occurred.
///
/// # Examples
///
/// ```
/// use lib65x02::{subtract_with_borrow, Features, Status};
///
/// let (a, p) = subtract_with_borrow(0x50, 0x30, Status::CARRY, &Features::nmos());
/// assert_eq!(a, 0x20);
/// assert!(p.contains(Status::CARRY));
///
/// // 0x00 - 0x01 = 0x99 with a borrow in BCD
/// let status = Status::CARRY | Status::DECIMAL;
/// let (a, p) = subtract_with_borrow(0x00, 0x01, status, &Features::nmos());
/// assert_eq!(a, 0x99);
/// assert!(!p.contains(Status::CARRY));
/// ```
pub fn subtract_with_borrow(a: u8, m: u8, status: Status, features: &Features) -> (u8, Status) {
    let borrow_in = !status.contains(Status::CARRY) as i16;

    let difference = a as i16 - m as i16 - borrow_in;
    let binary = difference as u8;
    let no_borrow = difference >= 0;
    let binary_overflow = (a ^ m) & (a ^ binary) & 0x80 != 0;

    if !(features.decimal_mode && status.contains(Status::DECIMAL)) {
        return (
            binary,
            with_arithmetic_flags(status, binary, no_borrow, binary_overflow),
        );
    }

    let mut low = (a & 0x0F) as i16 - (m & 0x0F) as i16 - borrow_in;
    let mut low_borrow = 0;
    if low < 0 {
        low = (low + 10) & 0x0F;
        low_borrow = 1;
    }

    let mut high = (a >> 4) as i16 - (m >> 4) as i16 - low_borrow;
    let mut high_borrow = false;
    if high < 0 {
        high = (high + 10) & 0x0F;
        high_borrow = true;
    }

    let bcd = (((high & 0x0F) << 4) | low) as u8;

    let status = if features.decimal_flags_bug {
        with_arithmetic_flags(status, binary, !high_borrow, binary_overflow)
    } else {
        let overflow = (a ^ m) & (a ^ bcd) & 0x80 != 0;
        with_arithmetic_flags(status, bcd, !high_borrow, overflow)
    };

    (bcd, status)
}

fn with_arithmetic_flags(status: Status, value: u8, carry: bool, overflow: bool) -> Status {
    let mut status = status - Status::ARITHMETIC;
    status.set(Status::CARRY, carry);
    status.set(Status::ZERO, value == 0);
    status.set(Status::OVERFLOW, overflow);
    status.set(Status::NEGATIVE, value & 0x80 != 0);
    status
}

/// Executes the ADC (Add with Carry) instruction.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);
    let (result, status) = add_with_carry(cpu.a, value, cpu.status, &cpu.features);

    cpu.a = result;
    cpu.status = status;
    cpu.advance(mode);
}

/// Executes the SBC (Subtract with Carry) instruction.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, operand: u16) {
    let value = cpu.operand_value(mode, operand);
    let (result, status) = subtract_with_borrow(cpu.a, value, cpu.status, &cpu.features);

    cpu.a = result;
    cpu.status = status;
    cpu.advance(mode);
}
