//! # Addressing Modes
//!
//! The addressing modes of the NMOS 6502 and the three the 65c02 adds, plus
//! the pure functions that resolve an operand into an effective address.
//!
//! Every multi-byte value is little-endian: the byte at the lower address is
//! the low byte, and the two are combined as `high << 8 | low`.
//!
//! Zero-page arithmetic wraps at 8 bits and absolute arithmetic at 16 bits.
//! Neither is an error.

use crate::MemoryBus;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY, ZeroPageIndirect
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect,
///   AbsoluteIndexedIndirect, ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,

    /// 65c02 zero page indirect without an index.
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,

    /// 65c02 indexed indirect jump through a 16-bit table.
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// 65c02 bit branches: a zero page address followed by a signed offset.
    ///
    /// Example: BBR3 $12,label
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::ZeroPageIndirect => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect
            | AddressingMode::AbsoluteIndexedIndirect
            | AddressingMode::ZeroPageRelative => 2,
        }
    }

    /// Encoded instruction length, opcode included.
    pub const fn instruction_len(self) -> u16 {
        1 + self.operand_bytes() as u16
    }
}

/// Reads a little-endian word at `addr` and `addr + 1` (16-bit wrap).
pub fn read_word<M: MemoryBus>(memory: &M, addr: u16) -> u16 {
    let low = memory.read(addr) as u16;
    let high = memory.read(addr.wrapping_add(1)) as u16;
    (high << 8) | low
}

/// Reads a little-endian pointer stored in zero page, wrapping inside it.
fn read_zero_page_word<M: MemoryBus>(memory: &M, zp: u8) -> u16 {
    let low = memory.read(zp as u16) as u16;
    let high = memory.read(zp.wrapping_add(1) as u16) as u16;
    (high << 8) | low
}

/// `zp,X` / `zp,Y`: `(zp + index) mod 256`.
pub fn zero_page_indexed(zp: u8, index: u8) -> u16 {
    zp.wrapping_add(index) as u16
}

/// `(zp,X)`: the pointer lives at `(zp + X) mod 256` and the following
/// zero-page byte.
pub fn indexed_indirect<M: MemoryBus>(memory: &M, zp: u8, x: u8) -> u16 {
    read_zero_page_word(memory, zp.wrapping_add(x))
}

/// `(zp),Y`: the pointer at `zp`/`zp + 1` (zero-page wrap) plus Y, 16-bit wrap.
pub fn indirect_indexed<M: MemoryBus>(memory: &M, zp: u8, y: u8) -> u16 {
    read_zero_page_word(memory, zp).wrapping_add(y as u16)
}

/// `(zp)`: the pointer at `zp`/`zp + 1` (zero-page wrap).
pub fn zero_page_indirect<M: MemoryBus>(memory: &M, zp: u8) -> u16 {
    read_zero_page_word(memory, zp)
}

/// `abs,X` / `abs,Y`: operand plus index, 16-bit wrap, no page-cross penalty.
pub fn absolute_indexed(addr: u16, index: u8) -> u16 {
    addr.wrapping_add(index as u16)
}

/// `JMP (addr)`.
///
/// With `page_wrap_bug` set and a pointer ending in `0xFF`, the high byte is
/// read from the start of the same page, e.g. `JMP ($10FF)` reads `$10FF`
/// and `$1000`.
pub fn indirect_absolute<M: MemoryBus>(memory: &M, addr: u16, page_wrap_bug: bool) -> u16 {
    if page_wrap_bug && addr & 0x00FF == 0x00FF {
        let low = memory.read(addr) as u16;
        let high = memory.read(addr & 0xFF00) as u16;
        (high << 8) | low
    } else {
        read_word(memory, addr)
    }
}

/// `JMP (addr,X)`: the pointer lives at `addr + X`.
pub fn absolute_indexed_indirect<M: MemoryBus>(memory: &M, addr: u16, x: u8) -> u16 {
    read_word(memory, addr.wrapping_add(x as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_operand_widths() {
        assert_eq!(AddressingMode::Implicit.instruction_len(), 1);
        assert_eq!(AddressingMode::Accumulator.instruction_len(), 1);
        assert_eq!(AddressingMode::IndirectY.instruction_len(), 2);
        assert_eq!(AddressingMode::ZeroPageIndirect.instruction_len(), 2);
        assert_eq!(AddressingMode::AbsoluteIndexedIndirect.instruction_len(), 3);
        assert_eq!(AddressingMode::ZeroPageRelative.instruction_len(), 3);
    }

    #[test]
    fn test_zero_page_indexed_wraps() {
        assert_eq!(zero_page_indexed(0x80, 0x0F), 0x008F);
        assert_eq!(zero_page_indexed(0xFF, 0x01), 0x0000);
        assert_eq!(zero_page_indexed(0xF0, 0x20), 0x0010);
    }

    #[test]
    fn test_indexed_indirect_combines_low_first() {
        let mut mem = FlatMemory::new();
        mem.write(0x24, 0x74);
        mem.write(0x25, 0x20);

        assert_eq!(indexed_indirect(&mem, 0x20, 0x04), 0x2074);
    }

    #[test]
    fn test_indexed_indirect_pointer_wraps_in_zero_page() {
        let mut mem = FlatMemory::new();
        mem.write(0xFF, 0x34);
        mem.write(0x00, 0x12);
        mem.write(0x100, 0x99);

        assert_eq!(indexed_indirect(&mem, 0xFE, 0x01), 0x1234);
    }

    #[test]
    fn test_indirect_indexed_adds_y_with_carry() {
        let mut mem = FlatMemory::new();
        mem.write(0x86, 0x28);
        mem.write(0x87, 0x40);

        assert_eq!(indirect_indexed(&mem, 0x86, 0x10), 0x4038);

        mem.write(0x86, 0xF0);
        assert_eq!(indirect_indexed(&mem, 0x86, 0x20), 0x4110);
    }

    #[test]
    fn test_indirect_indexed_wraps_at_16_bits() {
        let mut mem = FlatMemory::new();
        mem.write(0x10, 0xFF);
        mem.write(0x11, 0xFF);

        assert_eq!(indirect_indexed(&mem, 0x10, 0x02), 0x0001);
    }

    #[test]
    fn test_absolute_indexed_wraps() {
        assert_eq!(absolute_indexed(0x1234, 0x10), 0x1244);
        assert_eq!(absolute_indexed(0xFFFF, 0x01), 0x0000);
    }

    #[test]
    fn test_indirect_absolute_page_wrap_bug() {
        let mut mem = FlatMemory::new();
        mem.write(0x10FF, 0x34);
        mem.write(0x1000, 0x12);
        mem.write(0x1100, 0x56);

        assert_eq!(indirect_absolute(&mem, 0x10FF, true), 0x1234);
        assert_eq!(indirect_absolute(&mem, 0x10FF, false), 0x5634);
    }

    #[test]
    fn test_indirect_absolute_without_page_edge_ignores_bug() {
        let mut mem = FlatMemory::new();
        mem.write(0x2010, 0xCD);
        mem.write(0x2011, 0xAB);

        assert_eq!(indirect_absolute(&mem, 0x2010, true), 0xABCD);
        assert_eq!(indirect_absolute(&mem, 0x2010, false), 0xABCD);
    }

    #[test]
    fn test_absolute_indexed_indirect() {
        let mut mem = FlatMemory::new();
        mem.write(0x3006, 0x00);
        mem.write(0x3007, 0x90);

        assert_eq!(absolute_indexed_indirect(&mem, 0x3000, 0x06), 0x9000);
    }
}
