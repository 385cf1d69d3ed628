//! # 6502 / 65c02 Instruction Core
//!
//! An instruction-level emulator of the MOS 6502 family: it decodes opcodes,
//! resolves addressing modes and reproduces the register, flag and memory
//! effects of every documented NMOS instruction and, optionally, of the CMOS
//! 65c02 additions.
//!
//! Known silicon quirks (the early ROR, the `JMP ($xxFF)` page wrap, the NMOS
//! flags after decimal arithmetic) are individually switchable through
//! [`Features`], so the same core can stand in for a stock 6502, a NES 2A03 or
//! a 65c02.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib65x02::{CPU, Features, FlatMemory, Halt};
//!
//! let mut cpu = CPU::with_features(FlatMemory::new(), Features::nmos());
//!
//! // LDA #$05; CLC; ADC #$03; STA $0300; BRK
//! cpu.load(0x0200, &[0xA9, 0x05, 0x18, 0x69, 0x03, 0x8D, 0x00, 0x03, 0x00])
//!     .unwrap();
//! cpu.set_pc(0x0200);
//!
//! let summary = cpu.run(1_000);
//!
//! assert_eq!(summary.halt, Halt::Break);
//! assert_eq!(cpu.a(), 0x08);
//! assert_eq!(cpu.memory().as_slice()[0x0300], 0x08);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Table-Driven Dispatch**: a 256-slot table built once per feature set
//! - **No failure paths in execution**: unknown opcodes are reported through
//!   [`StepResult`]; all address arithmetic wraps like the hardware
//! - **WebAssembly Portability**: no OS dependencies, optional `wasm` bindings
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the step engine
//! - `memory` - MemoryBus trait and the flat 64 KiB implementation
//! - `opcodes` - Opcode dispatch table
//! - `addressing` - Addressing modes and effective address resolution
//! - `features` - Variant and quirk configuration
//! - `status` - Processor status register
//! - `runner` - Driving the core together with a bank switching memory mapper
//!
//! ## Logging
//!
//! The crate logs through the `log` facade and never installs a logger.
//! Every dispatched instruction is logged at `trace`, undefined opcodes and
//! reconfiguration at `debug`.

pub mod addressing;
pub mod cpu;
pub mod features;
pub mod memory;
pub mod opcodes;
pub mod runner;
pub mod status;
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{Halt, RunSummary, StepResult, CPU};
pub use features::Features;
pub use instructions::alu::{add_with_carry, subtract_with_borrow};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeInfo, Variant};
pub use runner::{MemoryMapper, Runner};
pub use status::Status;

/// Errors reported by the configuration and loading interfaces.
///
/// Instruction execution itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The bulk-load cursor may not point into zero page or the stack page.
    #[error("address 0x{address:04X} is reserved for zero page and stack")]
    ReservedAddress { address: u16 },
}
