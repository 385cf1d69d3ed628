//! # Memory Bus Abstraction
//!
//! The CPU reaches all 64 KiB of its address space through the `MemoryBus`
//! trait. The default backing store is [`FlatMemory`], a single owned array
//! laid out the way the 6502 sees it:
//!
//! - `0x0000-0x00FF`: zero page
//! - `0x0100-0x01FF`: stack
//! - `0x0200-0xFFFF`: general memory
//!
//! Nothing enforces this layout. A runaway stack pointer silently overwrites
//! whatever lives next to it, exactly like the hardware.

use std::ops::Range;

/// Memory bus trait for CPU to read/write bytes.
///
/// The 6502 has no bus error mechanism, so neither call can fail.
///
/// # Examples
///
/// ```
/// use lib65x02::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib65x02::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM are ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic; unmapped addresses may return anything.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic; read-only or unmapped addresses may drop the write.
    fn write(&mut self, addr: u16, value: u8);
}

/// Zero page, `0x0000-0x00FF`.
pub const ZERO_PAGE: Range<usize> = 0x0000..0x0100;

/// Hardware stack page, `0x0100-0x01FF`.
pub const STACK_PAGE: Range<usize> = 0x0100..0x0200;

/// First address of general purpose memory.
pub const GENERAL_MEMORY_START: u16 = 0x0200;

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to one contiguous array initialised to zero.
/// Memory mappers get direct slice access through [`FlatMemory::bank_mut`]
/// so a whole ROM bank can be copied in with one `copy_from_slice`.
///
/// # Examples
///
/// ```
/// use lib65x02::{FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.bank_mut(0x8000..0x8004).copy_from_slice(&[0xA9, 0x01, 0xEA, 0x00]);
/// assert_eq!(memory.read(0x8000), 0xA9);
/// assert_eq!(memory.read(0x8003), 0x00);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 0x10000]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 0x10000]),
        }
    }

    /// The whole address space as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    /// A mutable window over `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` reaches past `0x10000`, like any slice index.
    pub fn bank_mut(&mut self, range: Range<usize>) -> &mut [u8] {
        &mut self.data[range]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("zero_page", &&self.data[ZERO_PAGE])
            .finish_non_exhaustive()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_flat_memory_full_range() {
        let mut mem = FlatMemory::new();

        mem.write(0x0000, 0x01);
        mem.write(0x7FFF, 0x7F);
        mem.write(0x8000, 0x80);
        mem.write(0xFFFF, 0xFF);

        assert_eq!(mem.read(0x0000), 0x01);
        assert_eq!(mem.read(0x7FFF), 0x7F);
        assert_eq!(mem.read(0x8000), 0x80);
        assert_eq!(mem.read(0xFFFF), 0xFF);
    }

    #[test]
    fn test_bank_mut_is_visible_through_bus() {
        let mut mem = FlatMemory::new();
        mem.bank_mut(0xC000..0x10000).fill(0xEA);

        assert_eq!(mem.read(0xBFFF), 0x00);
        assert_eq!(mem.read(0xC000), 0xEA);
        assert_eq!(mem.read(0xFFFF), 0xEA);
        assert_eq!(mem.as_slice().len(), 0x10000);
    }

    #[test]
    fn test_page_layout_constants() {
        assert_eq!(ZERO_PAGE.len(), 256);
        assert_eq!(STACK_PAGE.start, ZERO_PAGE.end);
        assert_eq!(GENERAL_MEMORY_START as usize, STACK_PAGE.end);
    }
}
