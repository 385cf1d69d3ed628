//! Property-based tests for addressing mode calculations.
//!
//! These tests verify that the indexed and indirect modes compute effective
//! addresses with the right wraparound: 8-bit inside zero page, 16-bit
//! everywhere else.

use lib65x02::{Features, FlatMemory, MemoryBus, CPU};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// True if `addr` overlaps the 3 program bytes at 0x8000 or the reset vector.
fn reserved(addr: u16) -> bool {
    (0x8000..0x8003).contains(&addr) || addr >= 0xFFFC
}

// ========== Zero Page ==========

proptest! {
    #[test]
    fn prop_zero_page_x_wraps(zp in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu();
        let target = zp.wrapping_add(x) as u16;
        cpu.memory_mut().write(target, value);
        cpu.memory_mut().write(0x8000, 0xB5); // LDA zp,X
        cpu.memory_mut().write(0x8001, zp);
        cpu.set_x(x);

        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn prop_zero_page_y_wraps_for_stx(zp in any::<u8>(), y in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x96); // STX zp,Y
        cpu.memory_mut().write(0x8001, zp);
        cpu.set_x(value);
        cpu.set_y(y);

        cpu.step();

        prop_assert_eq!(cpu.memory().read(zp.wrapping_add(y) as u16), value);
    }
}

// ========== Absolute Indexed ==========

proptest! {
    #[test]
    fn prop_absolute_x_wraps_at_16_bits(
        base in any::<u16>(),
        x in any::<u8>(),
        value in any::<u8>(),
    ) {
        let target = base.wrapping_add(x as u16);
        prop_assume!(!reserved(target));

        let mut cpu = setup_cpu();
        cpu.memory_mut().write(target, value);
        cpu.memory_mut().write(0x8000, 0xBD); // LDA abs,X
        cpu.memory_mut().write(0x8001, base as u8);
        cpu.memory_mut().write(0x8002, (base >> 8) as u8);
        cpu.set_x(x);

        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.pc(), 0x8003);
    }

    #[test]
    fn prop_absolute_y_store(base in any::<u16>(), y in any::<u8>(), value in any::<u8>()) {
        let target = base.wrapping_add(y as u16);
        prop_assume!(!reserved(target));

        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x99); // STA abs,Y
        cpu.memory_mut().write(0x8001, base as u8);
        cpu.memory_mut().write(0x8002, (base >> 8) as u8);
        cpu.set_a(value);
        cpu.set_y(y);

        cpu.step();

        prop_assert_eq!(cpu.memory().read(target), value);
    }
}

// ========== Indirect ==========

proptest! {
    #[test]
    fn prop_indexed_indirect_pointer_stays_in_zero_page(
        zp in any::<u8>(),
        x in any::<u8>(),
        target in 0x0200u16..0x7FFF,
        value in any::<u8>(),
    ) {
        let pointer = zp.wrapping_add(x);
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(pointer as u16, target as u8);
        cpu.memory_mut().write(pointer.wrapping_add(1) as u16, (target >> 8) as u8);
        cpu.memory_mut().write(target, value);
        cpu.memory_mut().write(0x8000, 0xA1); // LDA (zp,X)
        cpu.memory_mut().write(0x8001, zp);
        cpu.set_x(x);

        cpu.step();

        prop_assert_eq!(cpu.a(), value);
    }

    #[test]
    fn prop_indirect_indexed_carries_into_high_byte(
        zp in any::<u8>(),
        base in 0x0200u16..0x7F00,
        y in any::<u8>(),
        value in any::<u8>(),
    ) {
        let target = base + y as u16;
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(zp as u16, base as u8);
        cpu.memory_mut().write(zp.wrapping_add(1) as u16, (base >> 8) as u8);
        cpu.memory_mut().write(target, value);
        cpu.memory_mut().write(0x8000, 0xB1); // LDA (zp),Y
        cpu.memory_mut().write(0x8001, zp);
        cpu.set_y(y);

        cpu.step();

        prop_assert_eq!(cpu.a(), value);
    }

    #[test]
    fn prop_indirect_jump_bug_only_at_page_end(
        pointer in 0x0200u16..0x7F00,
        low in any::<u8>(),
        high in any::<u8>(),
    ) {
        for bug in [true, false] {
            let features = Features::builder().indirect_jump_bug(bug).build();
            let mut memory = FlatMemory::new();
            memory.write(0xFFFD, 0x80);
            memory.write(0x8000, 0x6C); // JMP (pointer)
            memory.write(0x8001, pointer as u8);
            memory.write(0x8002, (pointer >> 8) as u8);
            memory.write(pointer, low);

            let high_addr = if bug && pointer & 0x00FF == 0x00FF {
                pointer & 0xFF00
            } else {
                pointer + 1
            };
            memory.write(high_addr, high);

            let mut cpu = CPU::with_features(memory, features);
            cpu.step();

            prop_assert_eq!(cpu.pc(), u16::from_le_bytes([low, high]));
        }
    }
}
