//! # Opcode Dispatch Table
//!
//! A 256-slot table mapping each opcode byte to its mnemonic, addressing mode
//! and handler. The table is built once per [`Features`] value:
//!
//! 1. The 151 documented NMOS 6502 opcodes are installed.
//! 2. If `cmos` is enabled, the 59 65c02 additions fill the slots still empty.
//!
//! A CMOS entry never replaces an NMOS one. Empty slots are undefined opcodes
//! and are handled by the step engine.
//!
//! Handlers are plain function pointers taking the addressing mode and the
//! little-endian operand fetched by the step engine. The per-bit 65c02 opcodes
//! (`RMBn`, `SMBn`, `BBRn`, `BBSn`) are produced by factories keyed on the bit
//! index.

use crate::addressing::AddressingMode;
use crate::addressing::AddressingMode::*;
use crate::instructions::{
    alu, bits, branches, compare, control, flags, inc_dec, load_store, logic, shifts, stack,
    transfer,
};
use crate::{Features, MemoryBus, CPU};

/// An instruction implementation.
///
/// Receives the addressing mode of the decoded opcode and its operand: the
/// single operand byte zero-extended, or the little-endian operand word.
pub(crate) type Handler<M> = fn(&mut CPU<M>, AddressingMode, u16);

/// Which instruction set an opcode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Documented NMOS 6502 instruction, also present on the 65c02.
    Nmos,
    /// 65c02 addition.
    Cmos,
}

/// Static description of a decoded opcode.
///
/// # Examples
///
/// ```
/// use lib65x02::{AddressingMode, CPU, FlatMemory, Variant};
///
/// let cpu = CPU::new(FlatMemory::new());
/// let lda = cpu.instruction(0xA9).unwrap();
///
/// assert_eq!(lda.mnemonic, "LDA");
/// assert_eq!(lda.mode, AddressingMode::Immediate);
/// assert_eq!(lda.size_bytes(), 2);
/// assert_eq!(lda.variant, Variant::Nmos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Instruction mnemonic (e.g. "LDA", "BBR3").
    pub mnemonic: &'static str,

    /// Addressing mode for this opcode.
    pub mode: AddressingMode,

    /// Instruction set the opcode comes from.
    pub variant: Variant,
}

impl OpcodeInfo {
    /// Total encoded size in bytes, opcode included.
    pub fn size_bytes(&self) -> u16 {
        self.mode.instruction_len()
    }
}

pub(crate) struct Instruction<M: MemoryBus> {
    pub(crate) info: OpcodeInfo,
    pub(crate) handler: Handler<M>,
}

// Derives would demand `M: Clone`.
impl<M: MemoryBus> Clone for Instruction<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MemoryBus> Copy for Instruction<M> {}

pub(crate) struct DispatchTable<M: MemoryBus> {
    slots: Box<[Option<Instruction<M>>; 256]>,
}

impl<M: MemoryBus> DispatchTable<M> {
    pub(crate) fn new(features: &Features) -> Self {
        let mut table = Self {
            slots: Box::new([None; 256]),
        };

        table.install_nmos();
        if features.cmos {
            table.install_cmos();
        }

        table
    }

    pub(crate) fn get(&self, opcode: u8) -> Option<Instruction<M>> {
        self.slots[opcode as usize]
    }

    /// Number of occupied slots.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn nmos(
        &mut self,
        opcode: u8,
        mnemonic: &'static str,
        mode: AddressingMode,
        handler: Handler<M>,
    ) {
        debug_assert!(
            self.slots[opcode as usize].is_none(),
            "duplicate opcode {opcode:02X}"
        );
        self.slots[opcode as usize] = Some(Instruction {
            info: OpcodeInfo {
                mnemonic,
                mode,
                variant: Variant::Nmos,
            },
            handler,
        });
    }

    fn cmos(
        &mut self,
        opcode: u8,
        mnemonic: &'static str,
        mode: AddressingMode,
        handler: Handler<M>,
    ) {
        let slot = &mut self.slots[opcode as usize];
        if slot.is_none() {
            *slot = Some(Instruction {
                info: OpcodeInfo {
                    mnemonic,
                    mode,
                    variant: Variant::Cmos,
                },
                handler,
            });
        }
    }

    fn install_nmos(&mut self) {
        // ========== Load / Store ==========
        self.nmos(0xA9, "LDA", Immediate, load_store::execute_lda);
        self.nmos(0xA5, "LDA", ZeroPage, load_store::execute_lda);
        self.nmos(0xB5, "LDA", ZeroPageX, load_store::execute_lda);
        self.nmos(0xAD, "LDA", Absolute, load_store::execute_lda);
        self.nmos(0xBD, "LDA", AbsoluteX, load_store::execute_lda);
        self.nmos(0xB9, "LDA", AbsoluteY, load_store::execute_lda);
        self.nmos(0xA1, "LDA", IndirectX, load_store::execute_lda);
        self.nmos(0xB1, "LDA", IndirectY, load_store::execute_lda);

        self.nmos(0xA2, "LDX", Immediate, load_store::execute_ldx);
        self.nmos(0xA6, "LDX", ZeroPage, load_store::execute_ldx);
        self.nmos(0xB6, "LDX", ZeroPageY, load_store::execute_ldx);
        self.nmos(0xAE, "LDX", Absolute, load_store::execute_ldx);
        self.nmos(0xBE, "LDX", AbsoluteY, load_store::execute_ldx);

        self.nmos(0xA0, "LDY", Immediate, load_store::execute_ldy);
        self.nmos(0xA4, "LDY", ZeroPage, load_store::execute_ldy);
        self.nmos(0xB4, "LDY", ZeroPageX, load_store::execute_ldy);
        self.nmos(0xAC, "LDY", Absolute, load_store::execute_ldy);
        self.nmos(0xBC, "LDY", AbsoluteX, load_store::execute_ldy);

        self.nmos(0x85, "STA", ZeroPage, load_store::execute_sta);
        self.nmos(0x95, "STA", ZeroPageX, load_store::execute_sta);
        self.nmos(0x8D, "STA", Absolute, load_store::execute_sta);
        self.nmos(0x9D, "STA", AbsoluteX, load_store::execute_sta);
        self.nmos(0x99, "STA", AbsoluteY, load_store::execute_sta);
        self.nmos(0x81, "STA", IndirectX, load_store::execute_sta);
        self.nmos(0x91, "STA", IndirectY, load_store::execute_sta);

        self.nmos(0x86, "STX", ZeroPage, load_store::execute_stx);
        self.nmos(0x96, "STX", ZeroPageY, load_store::execute_stx);
        self.nmos(0x8E, "STX", Absolute, load_store::execute_stx);

        self.nmos(0x84, "STY", ZeroPage, load_store::execute_sty);
        self.nmos(0x94, "STY", ZeroPageX, load_store::execute_sty);
        self.nmos(0x8C, "STY", Absolute, load_store::execute_sty);

        // ========== Transfers ==========
        self.nmos(0xAA, "TAX", Implicit, transfer::execute_tax);
        self.nmos(0xA8, "TAY", Implicit, transfer::execute_tay);
        self.nmos(0xBA, "TSX", Implicit, transfer::execute_tsx);
        self.nmos(0x8A, "TXA", Implicit, transfer::execute_txa);
        self.nmos(0x9A, "TXS", Implicit, transfer::execute_txs);
        self.nmos(0x98, "TYA", Implicit, transfer::execute_tya);

        // ========== Stack ==========
        self.nmos(0x48, "PHA", Implicit, stack::execute_pha);
        self.nmos(0x08, "PHP", Implicit, stack::execute_php);
        self.nmos(0x68, "PLA", Implicit, stack::execute_pla);
        self.nmos(0x28, "PLP", Implicit, stack::execute_plp);

        // ========== Arithmetic ==========
        self.nmos(0x69, "ADC", Immediate, alu::execute_adc);
        self.nmos(0x65, "ADC", ZeroPage, alu::execute_adc);
        self.nmos(0x75, "ADC", ZeroPageX, alu::execute_adc);
        self.nmos(0x6D, "ADC", Absolute, alu::execute_adc);
        self.nmos(0x7D, "ADC", AbsoluteX, alu::execute_adc);
        self.nmos(0x79, "ADC", AbsoluteY, alu::execute_adc);
        self.nmos(0x61, "ADC", IndirectX, alu::execute_adc);
        self.nmos(0x71, "ADC", IndirectY, alu::execute_adc);

        self.nmos(0xE9, "SBC", Immediate, alu::execute_sbc);
        self.nmos(0xE5, "SBC", ZeroPage, alu::execute_sbc);
        self.nmos(0xF5, "SBC", ZeroPageX, alu::execute_sbc);
        self.nmos(0xED, "SBC", Absolute, alu::execute_sbc);
        self.nmos(0xFD, "SBC", AbsoluteX, alu::execute_sbc);
        self.nmos(0xF9, "SBC", AbsoluteY, alu::execute_sbc);
        self.nmos(0xE1, "SBC", IndirectX, alu::execute_sbc);
        self.nmos(0xF1, "SBC", IndirectY, alu::execute_sbc);

        // ========== Logic ==========
        self.nmos(0x29, "AND", Immediate, logic::execute_and);
        self.nmos(0x25, "AND", ZeroPage, logic::execute_and);
        self.nmos(0x35, "AND", ZeroPageX, logic::execute_and);
        self.nmos(0x2D, "AND", Absolute, logic::execute_and);
        self.nmos(0x3D, "AND", AbsoluteX, logic::execute_and);
        self.nmos(0x39, "AND", AbsoluteY, logic::execute_and);
        self.nmos(0x21, "AND", IndirectX, logic::execute_and);
        self.nmos(0x31, "AND", IndirectY, logic::execute_and);

        self.nmos(0x09, "ORA", Immediate, logic::execute_ora);
        self.nmos(0x05, "ORA", ZeroPage, logic::execute_ora);
        self.nmos(0x15, "ORA", ZeroPageX, logic::execute_ora);
        self.nmos(0x0D, "ORA", Absolute, logic::execute_ora);
        self.nmos(0x1D, "ORA", AbsoluteX, logic::execute_ora);
        self.nmos(0x19, "ORA", AbsoluteY, logic::execute_ora);
        self.nmos(0x01, "ORA", IndirectX, logic::execute_ora);
        self.nmos(0x11, "ORA", IndirectY, logic::execute_ora);

        self.nmos(0x49, "EOR", Immediate, logic::execute_eor);
        self.nmos(0x45, "EOR", ZeroPage, logic::execute_eor);
        self.nmos(0x55, "EOR", ZeroPageX, logic::execute_eor);
        self.nmos(0x4D, "EOR", Absolute, logic::execute_eor);
        self.nmos(0x5D, "EOR", AbsoluteX, logic::execute_eor);
        self.nmos(0x59, "EOR", AbsoluteY, logic::execute_eor);
        self.nmos(0x41, "EOR", IndirectX, logic::execute_eor);
        self.nmos(0x51, "EOR", IndirectY, logic::execute_eor);

        // ========== Shifts and Rotates ==========
        self.nmos(0x0A, "ASL", Accumulator, shifts::execute_asl);
        self.nmos(0x06, "ASL", ZeroPage, shifts::execute_asl);
        self.nmos(0x16, "ASL", ZeroPageX, shifts::execute_asl);
        self.nmos(0x0E, "ASL", Absolute, shifts::execute_asl);
        self.nmos(0x1E, "ASL", AbsoluteX, shifts::execute_asl);

        self.nmos(0x4A, "LSR", Accumulator, shifts::execute_lsr);
        self.nmos(0x46, "LSR", ZeroPage, shifts::execute_lsr);
        self.nmos(0x56, "LSR", ZeroPageX, shifts::execute_lsr);
        self.nmos(0x4E, "LSR", Absolute, shifts::execute_lsr);
        self.nmos(0x5E, "LSR", AbsoluteX, shifts::execute_lsr);

        self.nmos(0x2A, "ROL", Accumulator, shifts::execute_rol);
        self.nmos(0x26, "ROL", ZeroPage, shifts::execute_rol);
        self.nmos(0x36, "ROL", ZeroPageX, shifts::execute_rol);
        self.nmos(0x2E, "ROL", Absolute, shifts::execute_rol);
        self.nmos(0x3E, "ROL", AbsoluteX, shifts::execute_rol);

        self.nmos(0x6A, "ROR", Accumulator, shifts::execute_ror);
        self.nmos(0x66, "ROR", ZeroPage, shifts::execute_ror);
        self.nmos(0x76, "ROR", ZeroPageX, shifts::execute_ror);
        self.nmos(0x6E, "ROR", Absolute, shifts::execute_ror);
        self.nmos(0x7E, "ROR", AbsoluteX, shifts::execute_ror);

        // ========== Increment / Decrement ==========
        self.nmos(0xE6, "INC", ZeroPage, inc_dec::execute_inc);
        self.nmos(0xF6, "INC", ZeroPageX, inc_dec::execute_inc);
        self.nmos(0xEE, "INC", Absolute, inc_dec::execute_inc);
        self.nmos(0xFE, "INC", AbsoluteX, inc_dec::execute_inc);

        self.nmos(0xC6, "DEC", ZeroPage, inc_dec::execute_dec);
        self.nmos(0xD6, "DEC", ZeroPageX, inc_dec::execute_dec);
        self.nmos(0xCE, "DEC", Absolute, inc_dec::execute_dec);
        self.nmos(0xDE, "DEC", AbsoluteX, inc_dec::execute_dec);

        self.nmos(0xE8, "INX", Implicit, inc_dec::execute_inx);
        self.nmos(0xC8, "INY", Implicit, inc_dec::execute_iny);
        self.nmos(0xCA, "DEX", Implicit, inc_dec::execute_dex);
        self.nmos(0x88, "DEY", Implicit, inc_dec::execute_dey);

        // ========== Compare and Test ==========
        self.nmos(0xC9, "CMP", Immediate, compare::execute_cmp);
        self.nmos(0xC5, "CMP", ZeroPage, compare::execute_cmp);
        self.nmos(0xD5, "CMP", ZeroPageX, compare::execute_cmp);
        self.nmos(0xCD, "CMP", Absolute, compare::execute_cmp);
        self.nmos(0xDD, "CMP", AbsoluteX, compare::execute_cmp);
        self.nmos(0xD9, "CMP", AbsoluteY, compare::execute_cmp);
        self.nmos(0xC1, "CMP", IndirectX, compare::execute_cmp);
        self.nmos(0xD1, "CMP", IndirectY, compare::execute_cmp);

        self.nmos(0xE0, "CPX", Immediate, compare::execute_cpx);
        self.nmos(0xE4, "CPX", ZeroPage, compare::execute_cpx);
        self.nmos(0xEC, "CPX", Absolute, compare::execute_cpx);

        self.nmos(0xC0, "CPY", Immediate, compare::execute_cpy);
        self.nmos(0xC4, "CPY", ZeroPage, compare::execute_cpy);
        self.nmos(0xCC, "CPY", Absolute, compare::execute_cpy);

        self.nmos(0x24, "BIT", ZeroPage, compare::execute_bit);
        self.nmos(0x2C, "BIT", Absolute, compare::execute_bit);

        // ========== Branches ==========
        self.nmos(0x90, "BCC", Relative, branches::execute_bcc);
        self.nmos(0xB0, "BCS", Relative, branches::execute_bcs);
        self.nmos(0xF0, "BEQ", Relative, branches::execute_beq);
        self.nmos(0xD0, "BNE", Relative, branches::execute_bne);
        self.nmos(0x30, "BMI", Relative, branches::execute_bmi);
        self.nmos(0x10, "BPL", Relative, branches::execute_bpl);
        self.nmos(0x50, "BVC", Relative, branches::execute_bvc);
        self.nmos(0x70, "BVS", Relative, branches::execute_bvs);

        // ========== Control Flow ==========
        self.nmos(0x4C, "JMP", Absolute, control::execute_jmp);
        self.nmos(0x6C, "JMP", Indirect, control::execute_jmp);
        self.nmos(0x20, "JSR", Absolute, control::execute_jsr);
        self.nmos(0x60, "RTS", Implicit, control::execute_rts);
        self.nmos(0x40, "RTI", Implicit, control::execute_rti);
        self.nmos(0x00, "BRK", Implicit, control::execute_brk);
        self.nmos(0xEA, "NOP", Implicit, control::execute_nop);

        // ========== Flags ==========
        self.nmos(0x18, "CLC", Implicit, flags::execute_clc);
        self.nmos(0xD8, "CLD", Implicit, flags::execute_cld);
        self.nmos(0x58, "CLI", Implicit, flags::execute_cli);
        self.nmos(0xB8, "CLV", Implicit, flags::execute_clv);
        self.nmos(0x38, "SEC", Implicit, flags::execute_sec);
        self.nmos(0xF8, "SED", Implicit, flags::execute_sed);
        self.nmos(0x78, "SEI", Implicit, flags::execute_sei);
    }

    fn install_cmos(&mut self) {
        // ========== No operand ==========
        self.cmos(0x1A, "INC", Accumulator, inc_dec::execute_inc);
        self.cmos(0x3A, "DEC", Accumulator, inc_dec::execute_dec);
        self.cmos(0x5A, "PHY", Implicit, stack::execute_phy);
        self.cmos(0x7A, "PLY", Implicit, stack::execute_ply);
        self.cmos(0xDA, "PHX", Implicit, stack::execute_phx);
        self.cmos(0xFA, "PLX", Implicit, stack::execute_plx);

        // ========== Zero page indirect ==========
        self.cmos(0x12, "ORA", ZeroPageIndirect, logic::execute_ora);
        self.cmos(0x32, "AND", ZeroPageIndirect, logic::execute_and);
        self.cmos(0x52, "EOR", ZeroPageIndirect, logic::execute_eor);
        self.cmos(0x72, "ADC", ZeroPageIndirect, alu::execute_adc);
        self.cmos(0x92, "STA", ZeroPageIndirect, load_store::execute_sta);
        self.cmos(0xB2, "LDA", ZeroPageIndirect, load_store::execute_lda);
        self.cmos(0xD2, "CMP", ZeroPageIndirect, compare::execute_cmp);
        self.cmos(0xF2, "SBC", ZeroPageIndirect, alu::execute_sbc);

        // ========== Test and set / reset ==========
        self.cmos(0x04, "TSB", ZeroPage, compare::execute_tsb);
        self.cmos(0x0C, "TSB", Absolute, compare::execute_tsb);
        self.cmos(0x14, "TRB", ZeroPage, compare::execute_trb);
        self.cmos(0x1C, "TRB", Absolute, compare::execute_trb);

        // ========== New BIT modes ==========
        self.cmos(0x89, "BIT", Immediate, compare::execute_bit);
        self.cmos(0x34, "BIT", ZeroPageX, compare::execute_bit);
        self.cmos(0x3C, "BIT", AbsoluteX, compare::execute_bit);

        // ========== Store zero ==========
        self.cmos(0x64, "STZ", ZeroPage, load_store::execute_stz);
        self.cmos(0x74, "STZ", ZeroPageX, load_store::execute_stz);
        self.cmos(0x9C, "STZ", Absolute, load_store::execute_stz);
        self.cmos(0x9E, "STZ", AbsoluteX, load_store::execute_stz);

        // ========== Jumps and branches ==========
        self.cmos(0x80, "BRA", Relative, branches::execute_bra);
        self.cmos(0x7C, "JMP", AbsoluteIndexedIndirect, control::execute_jmp);

        // ========== Per-bit ==========
        for bit in 0..8u8 {
            let row = bit << 4;
            self.cmos(0x07 | row, RMB[bit as usize], ZeroPage, bits::reset_bit(bit));
            self.cmos(0x87 | row, SMB[bit as usize], ZeroPage, bits::set_bit(bit));
            self.cmos(
                0x0F | row,
                BBR[bit as usize],
                ZeroPageRelative,
                branches::branch_on_reset(bit),
            );
            self.cmos(
                0x8F | row,
                BBS[bit as usize],
                ZeroPageRelative,
                branches::branch_on_set(bit),
            );
        }
    }
}

const RMB: [&str; 8] = ["RMB0", "RMB1", "RMB2", "RMB3", "RMB4", "RMB5", "RMB6", "RMB7"];
const SMB: [&str; 8] = ["SMB0", "SMB1", "SMB2", "SMB3", "SMB4", "SMB5", "SMB6", "SMB7"];
const BBR: [&str; 8] = ["BBR0", "BBR1", "BBR2", "BBR3", "BBR4", "BBR5", "BBR6", "BBR7"];
const BBS: [&str; 8] = ["BBS0", "BBS1", "BBS2", "BBS3", "BBS4", "BBS5", "BBS6", "BBS7"];
