//! WebAssembly bindings for the lib65x02 core.
//!
//! This module provides JavaScript-callable interfaces to the CPU, enabling
//! browser-based execution of 6502 and 65c02 machine code.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator;
