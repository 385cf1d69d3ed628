//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to verify that the arithmetic core and the step
//! engine maintain their invariants across all input combinations.

use lib65x02::{add_with_carry, subtract_with_borrow, Features, FlatMemory, MemoryBus, Status, CPU};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

fn carry_status(carry: bool) -> Status {
    if carry {
        Status::CARRY
    } else {
        Status::empty()
    }
}

/// Strategy producing a packed BCD byte 0x00-0x99.
fn bcd() -> impl Strategy<Value = u8> {
    (0u8..10, 0u8..10).prop_map(|(high, low)| (high << 4) | low)
}

fn from_bcd(value: u8) -> u16 {
    (value >> 4) as u16 * 10 + (value & 0x0F) as u16
}

fn to_bcd(value: u16) -> u8 {
    (((value / 10) << 4) | (value % 10)) as u8
}

fn features() -> impl Strategy<Value = Features> {
    (any::<[bool; 7]>()).prop_map(|b| {
        Features::builder()
            .decimal_mode(b[0])
            .ror_bug(b[1])
            .indirect_jump_bug(b[2])
            .decimal_flags_bug(b[3])
            .advance_on_invalid(b[4])
            .cmos(b[5])
            .restrict_cursor(b[6])
            .build()
    })
}

// ========== Arithmetic ==========

proptest! {
    #[test]
    fn prop_binary_adc_matches_integer_sum(
        a in any::<u8>(),
        m in any::<u8>(),
        carry in any::<bool>(),
    ) {
        let (result, status) = add_with_carry(a, m, carry_status(carry), &Features::nmos());
        let sum = a as u16 + m as u16 + carry as u16;

        prop_assert_eq!(result, sum as u8);
        prop_assert_eq!(status.contains(Status::CARRY), sum > 0xFF);
        prop_assert_eq!(status.contains(Status::ZERO), result == 0);
        prop_assert_eq!(status.contains(Status::NEGATIVE), result & 0x80 != 0);

        let signed = a as i8 as i16 + m as i8 as i16 + carry as i16;
        prop_assert_eq!(status.contains(Status::OVERFLOW), !(-128..=127).contains(&signed));
    }

    #[test]
    fn prop_adc_is_commutative(
        a in any::<u8>(),
        m in any::<u8>(),
        flags in any::<u8>(),
        features in features(),
    ) {
        let status = Status::from_bits_truncate(flags) - Status::UNUSED;

        prop_assert_eq!(
            add_with_carry(a, m, status, &features),
            add_with_carry(m, a, status, &features)
        );
    }

    #[test]
    fn prop_binary_sbc_is_adc_of_complement(
        a in any::<u8>(),
        m in any::<u8>(),
        carry in any::<bool>(),
    ) {
        let status = carry_status(carry);
        let nmos = Features::nmos();

        prop_assert_eq!(
            subtract_with_borrow(a, m, status, &nmos),
            add_with_carry(a, !m, status, &nmos)
        );
    }

    #[test]
    fn prop_arithmetic_leaves_control_flags(
        a in any::<u8>(),
        m in any::<u8>(),
        flags in any::<u8>(),
    ) {
        let status = Status::from_bits_truncate(flags) - Status::UNUSED;
        let control = Status::INTERRUPT_DISABLE | Status::DECIMAL | Status::BREAK;

        let (_, after_add) = add_with_carry(a, m, status, &Features::nmos());
        let (_, after_sub) = subtract_with_borrow(a, m, status, &Features::nmos());

        prop_assert_eq!(after_add & control, status & control);
        prop_assert_eq!(after_sub & control, status & control);
    }

    #[test]
    fn prop_decimal_adc_on_valid_bcd(a in bcd(), m in bcd(), carry in any::<bool>()) {
        let status = carry_status(carry) | Status::DECIMAL;
        let (result, after) = add_with_carry(a, m, status, &Features::nmos());
        let sum = from_bcd(a) + from_bcd(m) + carry as u16;

        prop_assert_eq!(result, to_bcd(sum % 100));
        prop_assert_eq!(after.contains(Status::CARRY), sum >= 100);
    }

    #[test]
    fn prop_decimal_sbc_on_valid_bcd(a in bcd(), m in bcd(), carry in any::<bool>()) {
        let status = carry_status(carry) | Status::DECIMAL;
        let (result, after) = subtract_with_borrow(a, m, status, &Features::nmos());
        let difference = from_bcd(a) as i16 - from_bcd(m) as i16 - !carry as i16;

        prop_assert_eq!(result, to_bcd(difference.rem_euclid(100) as u16));
        prop_assert_eq!(after.contains(Status::CARRY), difference >= 0);
    }

    #[test]
    fn prop_decimal_flags_bug_only_moves_znv(a in bcd(), m in bcd(), carry in any::<bool>()) {
        let status = carry_status(carry) | Status::DECIMAL;
        let buggy = Features::nmos();
        let fixed = Features::builder().decimal_flags_bug(false).build();

        let (result_buggy, flags_buggy) = add_with_carry(a, m, status, &buggy);
        let (result_fixed, flags_fixed) = add_with_carry(a, m, status, &fixed);

        prop_assert_eq!(result_buggy, result_fixed);
        prop_assert_eq!(flags_buggy.contains(Status::CARRY), flags_fixed.contains(Status::CARRY));
        prop_assert_eq!(flags_fixed.contains(Status::ZERO), result_fixed == 0);
    }
}

// ========== Instructions ==========

proptest! {
    #[test]
    fn prop_pha_pla_round_trip(a in any::<u8>(), sp in any::<u8>()) {
        let mut cpu = setup_cpu();
        // PHA; LDA #$00; PLA
        for (i, byte) in [0x48, 0xA9, 0x00, 0x68].into_iter().enumerate() {
            cpu.memory_mut().write(0x8000 + i as u16, byte);
        }
        cpu.set_a(a);
        cpu.set_sp(sp);

        for _ in 0..3 {
            cpu.step();
        }

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.sp(), sp);
        prop_assert_eq!(cpu.flag_z(), a == 0);
        prop_assert_eq!(cpu.flag_n(), a & 0x80 != 0);
    }

    #[test]
    fn prop_cmp_flags(a in any::<u8>(), m in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0xC9);
        cpu.memory_mut().write(0x8001, m);
        cpu.set_a(a);

        cpu.step();

        prop_assert_eq!(cpu.flag_c(), a >= m);
        prop_assert_eq!(cpu.flag_z(), a == m);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(m) & 0x80 != 0);
        prop_assert_eq!(cpu.a(), a);
    }

    #[test]
    fn prop_rol_ror_round_trip(value in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x2A); // ROL A
        cpu.memory_mut().write(0x8001, 0x6A); // ROR A
        cpu.set_a(value);
        cpu.set_flag_c(carry);

        cpu.step();
        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_c(), carry);
    }
}

// ========== Step engine ==========

proptest! {
    #[test]
    fn prop_step_keeps_unused_bit_clear(
        features in features(),
        bytes in any::<[u8; 3]>(),
        registers in any::<[u8; 4]>(),
        flags in any::<u8>(),
    ) {
        let mut cpu = CPU::with_features(FlatMemory::new(), features);
        cpu.memory_mut().write(0x0400, bytes[0]);
        cpu.memory_mut().write(0x0401, bytes[1]);
        cpu.memory_mut().write(0x0402, bytes[2]);
        cpu.set_pc(0x0400);
        cpu.set_a(registers[0]);
        cpu.set_x(registers[1]);
        cpu.set_y(registers[2]);
        cpu.set_sp(registers[3]);
        cpu.set_flags(Status::from_bits_truncate(flags));

        let result = cpu.step();

        prop_assert_eq!(cpu.status() & 0x20, 0);
        prop_assert_eq!(result.valid, result.nmos || result.cmos);
        if result.nmos {
            prop_assert!(result.cmos);
        }
    }

    #[test]
    fn prop_validity_follows_table(features in features(), opcode in any::<u8>()) {
        let mut cpu = CPU::with_features(FlatMemory::new(), features);
        cpu.memory_mut().write(0x0400, opcode);
        cpu.set_pc(0x0400);

        let info = cpu.instruction(opcode);
        let skippable = features.advance_on_invalid
            && matches!(opcode & 0x0F, 0x02 | 0x03 | 0x04 | 0x0B | 0x0C);
        let result = cpu.step();

        prop_assert_eq!(result.valid, info.is_some() || skippable);
        if !result.valid {
            prop_assert_eq!(cpu.pc(), 0x0400);
        }
        if info.is_none() && skippable {
            prop_assert_eq!((result.nmos, result.cmos), (false, true));
        }
    }
}
