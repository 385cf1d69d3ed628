//! # Processor Status Register
//!
//! The 8-bit `P` register with its fixed NV-BDIZC bit layout.
//!
//! Bit 5 is not a real latch on the 6502. This crate keeps it clear in the
//! live register and masks it out whenever status travels through the stack
//! (see [`Status::to_pushed`] and [`Status::from_pulled`]).

use bitflags::bitflags;

bitflags! {
    /// Processor status flags.
    ///
    /// | bit | flag |
    /// |-----|------|
    /// | 7   | N (Negative) |
    /// | 6   | V (Overflow) |
    /// | 5   | unused |
    /// | 4   | B (Break) |
    /// | 3   | D (Decimal) |
    /// | 2   | I (Interrupt disable) |
    /// | 1   | Z (Zero) |
    /// | 0   | C (Carry) |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

impl Status {
    /// The byte written to the stack by `PHP` and `BRK`.
    ///
    /// Break is forced on and the unused bit is masked out.
    ///
    /// ```
    /// use lib65x02::Status;
    ///
    /// let p = Status::CARRY | Status::NEGATIVE;
    /// assert_eq!(p.to_pushed(), 0b1001_0001);
    /// ```
    pub fn to_pushed(self) -> u8 {
        ((self | Status::BREAK) - Status::UNUSED).bits()
    }

    /// Interprets a byte pulled from the stack by `PLP` or `RTI`.
    ///
    /// Break and unused only exist in pushed copies, so both are dropped.
    pub fn from_pulled(byte: u8) -> Self {
        Status::from_bits_retain(byte) - (Status::BREAK | Status::UNUSED)
    }

    /// Flags that only arithmetic and test instructions touch.
    pub(crate) const ARITHMETIC: Status = Status::CARRY
        .union(Status::ZERO)
        .union(Status::OVERFLOW)
        .union(Status::NEGATIVE);
}
