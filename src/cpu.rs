//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the processor state and
//! the fetch-decode-execute step.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next opcode
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Status register** (P): a [`Status`] bitfield
//! - **Write cursor**: 16-bit bulk-load pointer, independent of PC
//! - **Features** and the dispatch table built from them
//!
//! ## Execution Model
//!
//! - `step()`: execute one instruction and report whether it decoded
//! - `run()`: step until `BRK`, an undecodable opcode, or a step budget
//!
//! A step is atomic. Handlers advance PC by their own encoded length, so the
//! step engine never touches PC for an opcode it recognises.

use std::fmt;

use crate::addressing::{self, AddressingMode};
use crate::memory::GENERAL_MEMORY_START;
use crate::opcodes::{DispatchTable, OpcodeInfo, Variant};
use crate::{Error, Features, FlatMemory, MemoryBus, Status};

/// Address of the little-endian reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the little-endian IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// The `BRK` opcode, used as the conventional end-of-program sentinel.
pub const BRK_OPCODE: u8 = 0x00;

/// Stack pointer value after power-on.
const POWER_ON_SP: u8 = 0xFD;

/// Outcome of a single [`CPU::step`].
///
/// `nmos` and `cmos` say whether the opcode is legal on each lineage. A
/// documented NMOS instruction is legal on both since the 65c02 is a
/// superset; a 65c02 addition reports `nmos == false, cmos == true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// `nmos || cmos`
    pub valid: bool,
    /// Executed as an NMOS 6502 instruction.
    pub nmos: bool,
    /// Executed as a 65c02 instruction (including skipped undefined NOPs).
    pub cmos: bool,
}

impl StepResult {
    fn new(nmos: bool, cmos: bool) -> Self {
        Self {
            valid: nmos || cmos,
            nmos,
            cmos,
        }
    }

    const INVALID: StepResult = StepResult {
        valid: false,
        nmos: false,
        cmos: false,
    };
}

impl From<StepResult> for (bool, bool, bool) {
    fn from(result: StepResult) -> Self {
        (result.valid, result.nmos, result.cmos)
    }
}

/// Why [`CPU::run`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The opcode at PC is `BRK`. It has not been executed.
    Break,
    /// The opcode at PC did not decode. PC still points at it unless
    /// `advance_on_invalid` skipped it.
    Invalid(u8),
    /// The step budget ran out.
    StepLimit,
}

/// Result of [`CPU::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of instructions executed.
    pub steps: usize,
    /// Stop reason.
    pub halt: Halt,
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait, with a
/// flat 64 KiB array as the default.
///
/// # Examples
///
/// ```
/// use lib65x02::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80); // PC = 0x8000
///
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
/// ```
pub struct CPU<M: MemoryBus = FlatMemory> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status register
    pub(crate) status: Status,

    /// Next address written by `write()`
    pub(crate) cursor: u16,

    pub(crate) features: Features,

    /// Memory bus implementation
    pub(crate) memory: M,

    table: DispatchTable<M>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates an NMOS 6502 with the given memory bus.
    ///
    /// See [`CPU::with_features`] for the power-on state.
    pub fn new(memory: M) -> Self {
        Self::with_features(memory, Features::default())
    }

    /// Creates a CPU configured by `features`.
    ///
    /// The CPU is initialized to the power-on reset state:
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is 0xFD
    /// - Only the Interrupt Disable flag is set
    /// - A, X and Y are zero
    /// - The write cursor sits at the start of general memory (0x0200)
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65x02::{CPU, Features, FlatMemory};
    ///
    /// let cpu = CPU::with_features(FlatMemory::new(), Features::cmos_65c02());
    /// assert!(cpu.features().cmos);
    /// assert_eq!(cpu.instruction(0x80).map(|i| i.mnemonic), Some("BRA"));
    /// ```
    pub fn with_features(memory: M, features: Features) -> Self {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: POWER_ON_SP,
            status: Status::INTERRUPT_DISABLE,
            cursor: GENERAL_MEMORY_START,
            features,
            memory,
            table: DispatchTable::new(&features),
        };
        cpu.reset();
        cpu
    }

    /// Puts the registers back into the power-on state. Memory and the write
    /// cursor are untouched.
    pub fn reset(&mut self) {
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.sp = POWER_ON_SP;
        self.status = Status::INTERRUPT_DISABLE;
        self.pc = addressing::read_word(&self.memory, RESET_VECTOR);
    }

    /// Executes one instruction.
    ///
    /// 1. Fetch the opcode at PC
    /// 2. Look it up in the dispatch table
    /// 3. Fetch 0, 1 or 2 operand bytes (little-endian)
    /// 4. Invoke the handler, which advances PC itself
    ///
    /// An opcode missing from the table leaves PC alone, unless the
    /// `advance_on_invalid` feature skips it as a NOP.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65x02::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    /// mem.write(0x8001, 0x02); // undefined
    ///
    /// let mut cpu = CPU::new(mem);
    ///
    /// assert!(cpu.step().valid);
    /// assert_eq!(cpu.pc(), 0x8001);
    ///
    /// let result = cpu.step();
    /// assert!(!result.valid);
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> StepResult {
        let opcode = self.memory.read(self.pc);

        let Some(instruction) = self.table.get(opcode) else {
            return self.skip_invalid(opcode);
        };

        let info = instruction.info;
        let operand = self.fetch_operand(info.mode);

        log::trace!(
            "{:04X}: {:02X} {} {:?} operand={:04X}",
            self.pc,
            opcode,
            info.mnemonic,
            info.mode,
            operand
        );

        (instruction.handler)(self, info.mode, operand);

        match info.variant {
            Variant::Nmos => StepResult::new(true, true),
            Variant::Cmos => StepResult::new(false, true),
        }
    }

    /// Steps until the opcode at PC is `BRK`, an opcode fails to decode, or
    /// `max_steps` instructions have run.
    ///
    /// The `BRK` sentinel is not executed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65x02::{CPU, FlatMemory, Halt};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.load(0x0200, &[0xA9, 0x07, 0xAA, 0x00]).unwrap(); // LDA #7; TAX; BRK
    /// cpu.set_pc(0x0200);
    ///
    /// let summary = cpu.run(100);
    /// assert_eq!(summary.steps, 2);
    /// assert_eq!(summary.halt, Halt::Break);
    /// assert_eq!(cpu.x(), 7);
    /// ```
    pub fn run(&mut self, max_steps: usize) -> RunSummary {
        let mut steps = 0;

        while steps < max_steps {
            let opcode = self.memory.read(self.pc);

            if opcode == BRK_OPCODE {
                return RunSummary {
                    steps,
                    halt: Halt::Break,
                };
            }

            if !self.step().valid {
                return RunSummary {
                    steps,
                    halt: Halt::Invalid(opcode),
                };
            }

            steps += 1;
        }

        RunSummary {
            steps,
            halt: Halt::StepLimit,
        }
    }

    /// Handles an opcode absent from every active table.
    ///
    /// With `advance_on_invalid`, the 65c02 undefined-opcode lengths are
    /// inferred from the low nibble: `x3`/`xB` are 1 byte, `x2`/`x4` are
    /// 2 bytes and `xC` is 3 bytes.
    fn skip_invalid(&mut self, opcode: u8) -> StepResult {
        if !self.features.advance_on_invalid {
            log::debug!("invalid opcode {:02X} at {:04X}", opcode, self.pc);
            return StepResult::INVALID;
        }

        let length = match opcode & 0x0F {
            0x03 | 0x0B => 1,
            0x02 | 0x04 => 2,
            0x0C => 3,
            _ => {
                log::debug!("invalid opcode {:02X} at {:04X}", opcode, self.pc);
                return StepResult::INVALID;
            }
        };

        log::debug!(
            "skipping undefined opcode {:02X} at {:04X} as a {}-byte NOP",
            opcode,
            self.pc,
            length
        );
        self.pc = self.pc.wrapping_add(length);
        StepResult::new(false, true)
    }

    fn fetch_operand(&self, mode: AddressingMode) -> u16 {
        match mode.operand_bytes() {
            0 => 0,
            1 => self.memory.read(self.pc.wrapping_add(1)) as u16,
            _ => addressing::read_word(&self.memory, self.pc.wrapping_add(1)),
        }
    }

    // ========== Configuration ==========

    /// Returns the active feature set.
    pub fn features(&self) -> Features {
        self.features
    }

    /// Replaces the feature set and rebuilds the dispatch table.
    ///
    /// Registers and memory are kept as they are.
    pub fn set_features(&mut self, features: Features) {
        log::debug!("reconfiguring core: {:?}", features);
        self.features = features;
        self.table = DispatchTable::new(&features);
    }

    /// Looks up `opcode` in the active dispatch table.
    pub fn instruction(&self, opcode: u8) -> Option<OpcodeInfo> {
        self.table.get(opcode).map(|instruction| instruction.info)
    }

    // ========== Bulk Memory Load ==========

    /// Moves the bulk-load write cursor.
    ///
    /// When the `restrict_cursor` feature is on, addresses inside zero page
    /// or the stack page are rejected and the cursor stays where it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65x02::{CPU, Error, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(
    ///     cpu.set_cursor(0x01FF),
    ///     Err(Error::ReservedAddress { address: 0x01FF })
    /// );
    /// assert_eq!(cpu.cursor(), 0x0200);
    /// assert!(cpu.set_cursor(0x8000).is_ok());
    /// ```
    pub fn set_cursor(&mut self, address: u16) -> Result<(), Error> {
        if self.features.restrict_cursor && address < GENERAL_MEMORY_START {
            log::warn!("refusing to move write cursor to {:04X}", address);
            return Err(Error::ReservedAddress { address });
        }

        self.cursor = address;
        Ok(())
    }

    /// Returns the bulk-load write cursor.
    pub fn cursor(&self) -> u16 {
        self.cursor
    }

    /// Copies `bytes` to memory at the cursor, advancing it.
    ///
    /// Stops before address 0xFFFF and returns how many bytes were written.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        let room = (0xFFFF - self.cursor) as usize;
        let count = room.min(bytes.len());

        for &byte in &bytes[..count] {
            self.memory.write(self.cursor, byte);
            self.cursor += 1;
        }

        count
    }

    /// `set_cursor(address)` followed by `write(bytes)`.
    pub fn load(&mut self, address: u16, bytes: &[u8]) -> Result<usize, Error> {
        self.set_cursor(address)?;
        Ok(self.write(bytes))
    }

    // ========== Handler Support ==========

    /// Sets Zero iff `value == 0` and Negative iff bit 7 of `value` is set.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.status.set(Status::ZERO, value == 0);
        self.status.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Advances PC past an instruction encoded in `mode`.
    pub(crate) fn advance(&mut self, mode: AddressingMode) {
        self.pc = self.pc.wrapping_add(mode.instruction_len());
    }

    /// Resolves the effective address of a memory operand.
    ///
    /// `operand` is the zero-page byte or the little-endian absolute word
    /// that followed the opcode.
    pub(crate) fn effective_address(&self, mode: AddressingMode, operand: u16) -> u16 {
        let zp = operand as u8;

        match mode {
            AddressingMode::ZeroPage | AddressingMode::ZeroPageRelative => zp as u16,
            AddressingMode::ZeroPageX => addressing::zero_page_indexed(zp, self.x),
            AddressingMode::ZeroPageY => addressing::zero_page_indexed(zp, self.y),
            AddressingMode::AbsoluteX => addressing::absolute_indexed(operand, self.x),
            AddressingMode::AbsoluteY => addressing::absolute_indexed(operand, self.y),
            AddressingMode::IndirectX => addressing::indexed_indirect(&self.memory, zp, self.x),
            AddressingMode::IndirectY => addressing::indirect_indexed(&self.memory, zp, self.y),
            AddressingMode::ZeroPageIndirect => addressing::zero_page_indirect(&self.memory, zp),
            AddressingMode::Indirect => addressing::indirect_absolute(
                &self.memory,
                operand,
                self.features.indirect_jump_bug,
            ),
            AddressingMode::AbsoluteIndexedIndirect => {
                addressing::absolute_indexed_indirect(&self.memory, operand, self.x)
            }
            AddressingMode::Absolute
            | AddressingMode::Immediate
            | AddressingMode::Relative
            | AddressingMode::Implicit
            | AddressingMode::Accumulator => operand,
        }
    }

    /// Reads the value an instruction operates on.
    pub(crate) fn operand_value(&self, mode: AddressingMode, operand: u16) -> u8 {
        match mode {
            AddressingMode::Immediate => operand as u8,
            AddressingMode::Accumulator => self.a,
            _ => self.memory.read(self.effective_address(mode, operand)),
        }
    }

    /// Read-modify-write on the accumulator or a memory operand.
    ///
    /// Returns the value written back.
    pub(crate) fn modify(
        &mut self,
        mode: AddressingMode,
        operand: u16,
        op: impl FnOnce(&mut Self, u8) -> u8,
    ) -> u8 {
        if mode == AddressingMode::Accumulator {
            let value = self.a;
            let result = op(self, value);
            self.a = result;
            result
        } else {
            let addr = self.effective_address(mode, operand);
            let value = self.memory.read(addr);
            let result = op(self, value);
            self.memory.write(addr, result);
            result
        }
    }

    /// Writes `value` at `0x0100 + SP`, then decrements SP (wrapping).
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increments SP (wrapping), then reads `0x0100 + SP`.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes the high byte, then the low byte.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    /// Pulls the low byte, then the high byte.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let low = self.pull() as u16;
        let high = self.pull() as u16;
        (high << 8) | low
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register.
    pub fn flags(&self) -> Status {
        self.status
    }

    /// Returns the status register as a packed NV-BDIZC byte.
    ///
    /// Bit 5 is always clear in the live register.
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    // ========== Register Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces the status register. The unused bit is dropped.
    pub fn set_flags(&mut self, status: Status) {
        self.status = status - Status::UNUSED;
    }

    // ========== Status Flag Accessors ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.contains(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.status.contains(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.status.contains(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.status.contains(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.status.contains(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.contains(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.contains(Status::CARRY)
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.status.set(Status::NEGATIVE, value);
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.status.set(Status::OVERFLOW, value);
    }

    /// Sets or clears the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.status.set(Status::BREAK, value);
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.status.set(Status::DECIMAL, value);
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.status.set(Status::INTERRUPT_DISABLE, value);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.status.set(Status::ZERO, value);
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.status.set(Status::CARRY, value);
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// This is the hook memory mappers use to swap banks between steps.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands back its memory.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

impl<M: MemoryBus> fmt::Debug for CPU<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CPU")
            .field("a", &format_args!("{:02X}", self.a))
            .field("x", &format_args!("{:02X}", self.x))
            .field("y", &format_args!("{:02X}", self.y))
            .field("pc", &format_args!("{:04X}", self.pc))
            .field("sp", &format_args!("{:02X}", self.sp))
            .field("status", &self.status)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}
