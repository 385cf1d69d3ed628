//! Tests for the flag instructions: CLC, SEC, CLI, SEI, CLV, CLD, SED.

use lib65x02::{Features, FlatMemory, MemoryBus, Status, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_each_flag_instruction_touches_one_flag() {
    let cases = [
        (0x18, Status::CARRY, false),
        (0x38, Status::CARRY, true),
        (0x58, Status::INTERRUPT_DISABLE, false),
        (0x78, Status::INTERRUPT_DISABLE, true),
        (0xB8, Status::OVERFLOW, false),
        (0xD8, Status::DECIMAL, false),
        (0xF8, Status::DECIMAL, true),
    ];

    for (opcode, flag, set) in cases {
        for start in [Status::empty(), Status::all() - Status::UNUSED] {
            let mut cpu = setup_cpu();
            cpu.memory_mut().write(0x8000, opcode);
            cpu.set_flags(start);

            cpu.step();

            let mut expected = start;
            expected.set(flag, set);
            assert_eq!(cpu.flags(), expected, "{opcode:02X} from {start:?}");
            assert_eq!(cpu.pc(), 0x8001);
        }
    }
}

#[test]
fn test_repeated_flag_instructions_are_idempotent() {
    let mut cpu = setup_cpu();
    // CLC; CLC; SEC; CLC; SEC
    for (i, byte) in [0x18, 0x18, 0x38, 0x18, 0x38].into_iter().enumerate() {
        cpu.memory_mut().write(0x8000 + i as u16, byte);
    }
    cpu.set_flag_c(true);

    cpu.step();
    cpu.step();
    assert!(!cpu.flag_c());

    cpu.step();
    cpu.step();
    cpu.step();
    assert!(cpu.flag_c());
    assert_eq!(cpu.pc(), 0x8005);
}

#[test]
fn test_sed_without_decimal_mode_still_sets_flag() {
    let mut cpu = CPU::with_features(FlatMemory::new(), Features::ricoh_2a03());
    cpu.load(0x0200, &[0xF8, 0xA9, 0x09, 0x69, 0x01]).unwrap(); // SED; LDA #9; ADC #1
    cpu.set_pc(0x0200);

    cpu.step();
    assert!(cpu.flag_d());

    cpu.step();
    cpu.step();
    assert_eq!(cpu.a(), 0x0A);
}
