//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 and 65c02 instructions,
//! organized by category. Each instruction is a standalone function taking the
//! CPU, the addressing mode of the decoded opcode and its operand, so one body
//! serves every addressing variant.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic with BCD correction (ADC, SBC)
//! - **logic**: Bitwise operations (AND, ORA, EOR)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **compare**: Compare and test (CMP, CPX, CPY, BIT, TSB, TRB)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP, PHX, PLX, PHY, PLY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **branches**: Relative branches (Bxx, BRA, BBRn, BBSn)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **bits**: Zero page bit manipulation (RMBn, SMBn)

pub mod alu;
pub mod bits;
pub mod branches;
pub mod compare;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod logic;
pub mod shifts;
pub mod stack;
pub mod transfer;
