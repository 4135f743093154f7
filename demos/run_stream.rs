//! Run-stream example
//!
//! Demonstrates driving the core over an in-memory byte stream.
//!
//! This example shows:
//! - Building a configuration for an NES-style 2 KiB system
//! - Stepping instructions one at a time and watching the cursor move
//! - Running the rest of the program with an instruction budget
//! - Inspecting registers, flags and memory afterwards

use core6502::{decode_at, CoreConfig, Cpu, Flag, StopReason};

/// Sums 1..=10 into $0200 using a countdown loop, then jams.
///
/// ```text
/// $0600  A9 00     LDA #$00
/// $0602  A2 0A     LDX #$0A
/// $0604  86 10     STX $10
/// $0606  18        CLC
/// $0607  65 10     ADC $10
/// $0609  C6 10     DEC $10
/// $060B  D0 F9     BNE $0606
/// $060D  8D 00 02  STA $0200
/// $0610  02        JAM
/// ```
const PROGRAM: [u8; 17] = [
    0xA9, 0x00, 0xA2, 0x0A, 0x86, 0x10, 0x18, 0x65, 0x10, 0xC6, 0x10, 0xD0, 0xF9, 0x8D, 0x00,
    0x02, 0x02,
];

fn main() {
    println!("6502 Core - Run Stream Example");
    println!("==============================\n");

    let config = CoreConfig::nes().with_origin(0x0600);
    let mut cpu = match Cpu::new(config) {
        Ok(cpu) => cpu,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };

    println!("Stepping the first three instructions:");
    println!("--------------------------------------");
    for _ in 0..3 {
        let cursor = cpu.cursor();
        if let Ok((instr, _)) = decode_at(&PROGRAM, cursor, config.origin) {
            print!(
                "  ${:04X}  {:02X}  {:<4}{:?}",
                instr.address(),
                instr.opcode(),
                instr.mnemonic(),
                instr.addressing_mode()
            );
        }
        match cpu.step(&PROGRAM) {
            Ok(next) => println!("  -> cursor {}", next),
            Err(e) => {
                println!("  -> error: {}", e);
                return;
            }
        }
    }

    println!("\nRunning the rest (budget 1000):");
    println!("-------------------------------");
    let summary = match cpu.run(&PROGRAM, Some(1000)) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("run failed: {}", e);
            return;
        }
    };

    match summary.stop {
        StopReason::Halted(cause) => println!("  Halted: {}", cause),
        StopReason::EndOfStream => println!("  Reached end of stream"),
        StopReason::BudgetExhausted => println!("  Budget exhausted"),
    }
    println!("  Instructions this run: {}", summary.instructions);
    println!("  Instructions total:    {}", cpu.instructions_executed());

    let state = cpu.state();
    println!("\nFinal State:");
    println!("------------");
    println!("  PC: 0x{:04X}", state.pc());
    println!("  SP: 0x{:02X}", state.sp());
    println!("  A:  0x{:02X} ({})", state.a(), state.a());
    println!("  X:  0x{:02X}", state.x());
    println!(
        "  Status: 0x{:02X} (NV-BDIZC: {:08b})",
        state.status(),
        state.status()
    );
    println!("  Z: {}  C: {}", state.get_flag(Flag::Zero), state.get_flag(Flag::Carry));

    match state.read(0x0200) {
        Ok(sum) => println!("  $0200 = {} (expected 55)", sum),
        Err(e) => println!("  $0200 unreadable: {}", e),
    }
}
