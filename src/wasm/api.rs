//! WASM API for the 6502 core.
//!
//! Provides JavaScript-callable interfaces for loading programs, stepping the
//! CPU and inspecting its state.

use crate::{Features, FlatMemory, Halt, MemoryBus, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Outcome of a single step, mirroring `StepResult`
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    valid: bool,
    nmos: bool,
    cmos: bool,
}

#[wasm_bindgen]
impl StepOutcome {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    #[wasm_bindgen(getter)]
    pub fn nmos(&self) -> bool {
        self.nmos
    }

    #[wasm_bindgen(getter)]
    pub fn cmos(&self) -> bool {
        self.cmos
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator {
    /// Create an NMOS 6502, or a 65c02 when `cmos` is true
    #[wasm_bindgen(constructor)]
    pub fn new(cmos: bool) -> Self {
        let features = if cmos {
            Features::cmos_65c02()
        } else {
            Features::nmos()
        };

        Emulator {
            cpu: CPU::with_features(FlatMemory::new(), features),
        }
    }

    /// Copy a program into memory at `start_addr` and point PC at it
    ///
    /// Returns the number of bytes written.
    pub fn load(&mut self, program: &[u8], start_addr: u16) -> Result<usize, JsError> {
        let written = self
            .cpu
            .load(start_addr, program)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.cpu.set_pc(start_addr);
        Ok(written)
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> StepOutcome {
        let result = self.cpu.step();
        StepOutcome {
            valid: result.valid,
            nmos: result.nmos,
            cmos: result.cmos,
        }
    }

    /// Run until BRK, an invalid opcode or `max_steps`, returning the steps taken
    pub fn run(&mut self, max_steps: u32) -> Result<u32, JsError> {
        let summary = self.cpu.run(max_steps as usize);
        match summary.halt {
            Halt::Invalid(opcode) => Err(JsError::new(&format!(
                "invalid opcode 0x{:02X} at 0x{:04X}",
                opcode,
                self.cpu.pc()
            ))),
            Halt::Break | Halt::StepLimit => Ok(summary.steps as u32),
        }
    }

    /// Reset the registers, keeping memory
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    /// Read a single byte from memory
    pub fn read(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// A 256-byte page of memory as a typed array copy (for display)
    pub fn memory_page(&self, page: u8) -> js_sys::Uint8Array {
        let start = (page as usize) << 8;
        js_sys::Uint8Array::from(&self.cpu.memory().as_slice()[start..start + 0x100])
    }
}
