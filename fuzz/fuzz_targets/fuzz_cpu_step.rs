//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states, feature sets and memory
//! contents, then executes a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use lib65x02::{Features, FlatMemory, MemoryBus, Status, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Raw status byte
    status: u8,
}

/// Arbitrary feature toggles
#[derive(Debug, Arbitrary)]
struct FuzzFeatures {
    decimal_mode: bool,
    ror_bug: bool,
    indirect_jump_bug: bool,
    decimal_flags_bug: bool,
    advance_on_invalid: bool,
    cmos: bool,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (a few instructions + operands)
    instruction_bytes: [u8; 12],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Small region of memory for testing
    main_memory: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    features: FuzzFeatures,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    // Reset vector -> 0x8000, IRQ vector -> 0x9000
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);

    memory
        .bank_mut(0x8000..0x800C)
        .copy_from_slice(&input.memory.instruction_bytes);
    memory
        .bank_mut(0x0000..0x0100)
        .copy_from_slice(&input.memory.zero_page);
    memory
        .bank_mut(0x0100..0x0200)
        .copy_from_slice(&input.memory.stack_page);
    // Absolute addressing target
    memory
        .bank_mut(0x4000..0x4100)
        .copy_from_slice(&input.memory.main_memory);

    let features = Features::builder()
        .decimal_mode(input.features.decimal_mode)
        .ror_bug(input.features.ror_bug)
        .indirect_jump_bug(input.features.indirect_jump_bug)
        .decimal_flags_bug(input.features.decimal_flags_bug)
        .advance_on_invalid(input.features.advance_on_invalid)
        .cmos(input.features.cmos)
        .build();

    let mut cpu = CPU::with_features(memory, features);

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_flags(Status::from_bits_retain(input.cpu_state.status));

    // Stepping must never panic, whatever the opcode stream
    for _ in 0..4 {
        let result = cpu.step();

        // Invariants that must hold after every step
        assert_eq!(result.valid, result.nmos || result.cmos);
        assert!(!result.nmos || result.cmos);
        assert!(!cpu.flags().contains(Status::UNUSED));
    }
});
