//! CPU initialization tests
//!
//! Verifies the power-on state, the reset vector and a typical reset routine.

use lib65x02::{Features, FlatMemory, MemoryBus, Status, CPU};

#[test]
fn test_cpu_reset_values() {
    let mut memory = FlatMemory::new();

    // Set reset vector to 0x1234
    memory.write(0xFFFC, 0x34);
    memory.write(0xFFFD, 0x12);

    let cpu = CPU::new(memory);

    assert_eq!(cpu.pc(), 0x1234, "PC should be loaded from reset vector");
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.y(), 0x00);
    assert_eq!(cpu.sp(), 0xFD);

    assert!(cpu.flag_i(), "Interrupt disable flag should be set");
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_b());
    assert!(!cpu.flag_d());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
}

#[test]
fn test_status_register_format() {
    let cpu = CPU::new(FlatMemory::new());

    // Bit 5 is never set in the live register
    assert_eq!(cpu.status() & 0b0010_0000, 0);
    assert_eq!(cpu.status(), 0x04);
}

#[test]
fn test_set_flags_drops_unused_bit() {
    let mut cpu = CPU::new(FlatMemory::new());

    cpu.set_flags(Status::all());

    assert_eq!(cpu.status(), 0b1101_1111);
}

#[test]
fn test_every_preset_resets_identically() {
    for features in [
        Features::nmos(),
        Features::ricoh_2a03(),
        Features::cmos_65c02(),
        Features::early_revision(),
    ] {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0xC0);

        let cpu = CPU::with_features(memory, features);

        assert_eq!(cpu.pc(), 0xC000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.flags(), Status::INTERRUPT_DISABLE);
        assert_eq!(cpu.features(), features);
    }
}

#[test]
fn test_reset_routine_from_poisoned_state() {
    let mut cpu = CPU::new(FlatMemory::new());
    // LDX #$FF; TXS; SEI; CLC; CLD; CLI; CLV; LDA #$00; LDX #$00; LDY #$00
    let routine = [
        0xA2, 0xFF, 0x9A, 0x78, 0x18, 0xD8, 0x58, 0xB8, 0xA9, 0x00, 0xA2, 0x00, 0xA0, 0x00,
    ];
    assert_eq!(cpu.load(0x0200, &routine), Ok(routine.len()));

    cpu.set_pc(0x0200);
    cpu.set_a(0x5A);
    cpu.set_x(0xA5);
    cpu.set_y(0x3C);
    cpu.set_sp(0x12);
    cpu.set_flags(Status::all());

    for _ in 0..10 {
        assert!(cpu.step().valid);
    }

    assert_eq!(cpu.pc(), 0x020E);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.y(), 0x00);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(!cpu.flag_d());
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert!(cpu.flag_z());
    // CLI runs after SEI
    assert!(!cpu.flag_i());
}

#[test]
fn test_reset_rereads_vector() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CPU::new(memory);

    cpu.memory_mut().write(0xFFFC, 0x10);
    cpu.set_flags(Status::CARRY | Status::DECIMAL);
    cpu.reset();

    assert_eq!(cpu.pc(), 0x8010);
    assert_eq!(cpu.flags(), Status::INTERRUPT_DISABLE);
}
