//! # Core and Memory Mapper Runner
//!
//! Cartridge based machines change what the CPU sees in its upper address
//! space by copying ROM banks in and out. The core knows nothing about this;
//! a [`MemoryMapper`] works on the CPU's memory between instructions and a
//! [`Runner`] keeps the two in lock step.
//!
//! ```
//! use lib65x02::{CPU, FlatMemory, MemoryMapper, Runner};
//!
//! /// Mirrors one 16 KiB bank into both halves of 0x8000-0xFFFF.
//! struct Mirror {
//!     bank: Vec<u8>,
//! }
//!
//! impl MemoryMapper<FlatMemory> for Mirror {
//!     fn swap(&mut self, cpu: &mut CPU<FlatMemory>) -> bool {
//!         let memory = cpu.memory_mut();
//!         memory.bank_mut(0x8000..0xC000).copy_from_slice(&self.bank);
//!         memory.bank_mut(0xC000..0x10000).copy_from_slice(&self.bank);
//!         true
//!     }
//!
//!     fn step(&mut self, _cpu: &mut CPU<FlatMemory>) -> bool {
//!         true
//!     }
//! }
//!
//! let mut cpu = CPU::new(FlatMemory::new());
//! cpu.load(0x0200, &[0xEA]).unwrap();
//! cpu.set_pc(0x0200);
//!
//! let mut runner = Runner::new(cpu, Mirror { bank: vec![0x42; 0x4000] });
//! assert!(runner.step());
//! assert_eq!(runner.cpu().memory().as_slice()[0xFFFF], 0x42);
//! ```

use crate::{MemoryBus, CPU};

/// A bank switching memory mapper.
///
/// Both hooks return `false` to signal that the machine should stop, e.g.
/// because a bank could not be installed.
pub trait MemoryMapper<M: MemoryBus> {
    /// Installs the currently selected banks into the CPU's memory.
    fn swap(&mut self, cpu: &mut CPU<M>) -> bool;

    /// Advances the mapper by one CPU instruction.
    fn step(&mut self, cpu: &mut CPU<M>) -> bool;
}

/// Drives a CPU and a memory mapper together.
pub struct Runner<M: MemoryBus, P: MemoryMapper<M>> {
    cpu: CPU<M>,
    mapper: P,
}

impl<M: MemoryBus, P: MemoryMapper<M>> Runner<M, P> {
    pub fn new(cpu: CPU<M>, mapper: P) -> Self {
        Self { cpu, mapper }
    }

    /// Executes one instruction, then steps the mapper and lets it swap
    /// banks.
    ///
    /// The mapper is only consulted when the instruction was valid. Returns
    /// false as soon as the CPU or either mapper hook reports failure.
    pub fn step(&mut self) -> bool {
        if !self.cpu.step().valid {
            log::debug!("runner stopped on invalid opcode at {:04X}", self.cpu.pc());
            return false;
        }

        if !self.mapper.step(&mut self.cpu) {
            log::debug!("memory mapper step failed at {:04X}", self.cpu.pc());
            return false;
        }

        if !self.mapper.swap(&mut self.cpu) {
            log::debug!("memory mapper swap failed at {:04X}", self.cpu.pc());
            return false;
        }

        true
    }

    pub fn cpu(&self) -> &CPU<M> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<M> {
        &mut self.cpu
    }

    pub fn mapper(&self) -> &P {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut P {
        &mut self.mapper
    }

    /// Splits the runner back into its CPU and mapper.
    pub fn into_parts(self) -> (CPU<M>, P) {
        (self.cpu, self.mapper)
    }
}
