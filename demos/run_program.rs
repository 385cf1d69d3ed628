//! Run program example
//!
//! Loads a small decimal-mode program, runs it to the terminating BRK and
//! prints the machine state, first on an NMOS 6502 and then on a NES-style
//! core without decimal arithmetic.
//!
//! Run with `RUST_LOG=trace` to see every dispatched instruction.

use lib65x02::{Features, FlatMemory, Halt, MemoryBus, CPU};

/// Adds 5 ten times with the decimal flag set and stores the result at $0300.
const PROGRAM: &[u8] = &[
    0xF8, //       SED
    0xA9, 0x00, // LDA #$00
    0xA2, 0x0A, // LDX #$0A
    0x18, //       loop: CLC
    0x69, 0x05, //       ADC #$05
    0xCA, //             DEX
    0xD0, 0xFA, //       BNE loop
    0xD8, //       CLD
    0x8D, 0x00, 0x03, // STA $0300
    0x00, //       BRK
];

const LOAD_ADDRESS: u16 = 0x0200;

fn run(name: &str, features: Features) {
    println!("{name}");
    println!("{}", "-".repeat(name.len()));

    let mut cpu = CPU::with_features(FlatMemory::new(), features);

    let written = match cpu.load(LOAD_ADDRESS, PROGRAM) {
        Ok(written) => written,
        Err(e) => {
            eprintln!("  load failed: {e}");
            return;
        }
    };
    cpu.set_pc(LOAD_ADDRESS);
    println!("  Loaded {} bytes at 0x{:04X}", written, LOAD_ADDRESS);

    let summary = cpu.run(1_000);
    match summary.halt {
        Halt::Break => println!("  Reached BRK after {} instructions", summary.steps),
        Halt::Invalid(opcode) => println!(
            "  Stopped on invalid opcode 0x{:02X} at 0x{:04X}",
            opcode,
            cpu.pc()
        ),
        Halt::StepLimit => println!("  Step limit reached"),
    }

    println!("  PC: 0x{:04X}", cpu.pc());
    println!("  A:  0x{:02X}", cpu.a());
    println!(
        "  Status: 0x{:02X} (NV-BDIZC: {:08b})",
        cpu.status(),
        cpu.status()
    );
    println!("  $0300: 0x{:02X}\n", cpu.memory().read(0x0300));
}

fn main() {
    env_logger::init();

    println!("lib65x02 - Run Program Example");
    println!("==============================\n");

    // 10 x 5 = 0x50 in BCD
    run("NMOS 6502", Features::nmos());

    // Decimal flag ignored: 10 x 5 = 0x32 in binary
    run("Ricoh 2A03", Features::ricoh_2a03());
}
