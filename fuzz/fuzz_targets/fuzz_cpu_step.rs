//! Fuzz target for single-instruction execution.
//!
//! This target creates arbitrary register states, memory contents and
//! configurations, then steps one instruction. Any failure must leave the
//! state exactly as it was.

#![no_main]

use arbitrary::Arbitrary;
use core6502::{step, AddressPolicy, CoreConfig, Flags, Registers, State};
use libfuzzer_sys::fuzz_target;

/// Arbitrary register file for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Packed NV-BDIZC status
    status: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    registers: FuzzRegisters,
    memory: FuzzMemory,
    /// Instruction stream (opcode + operands)
    stream: [u8; 3],
    memory_size: u16,
    strict: bool,
    decimal_mode: bool,
}

fuzz_target!(|input: FuzzInput| {
    let policy = if input.strict {
        AddressPolicy::Strict
    } else {
        AddressPolicy::Wrap
    };
    let config = CoreConfig::default()
        .with_memory_size(input.memory_size as usize + 1)
        .with_address_policy(policy)
        .with_decimal_mode(input.decimal_mode);

    let Ok(mut state) = State::new(config) else {
        return;
    };

    // Memory setup goes through the policy too; out-of-range pages are skipped
    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        let _ = state.write(i as u16, byte);
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        let _ = state.write(0x0100 + i as u16, byte);
    }

    state.set_registers(Registers {
        pc: 0,
        sp: input.registers.sp,
        a: input.registers.a,
        x: input.registers.x,
        y: input.registers.y,
        flags: Flags::from_byte(input.registers.status),
    });

    let before = state.clone();

    match step(&mut state, &input.stream, 0) {
        Ok(cursor) => {
            assert_eq!(cursor, state.pc() as usize);
        }
        Err(_) => {
            // Failed instructions commit nothing
            assert_eq!(state.registers(), before.registers());
            assert_eq!(state.memory(), before.memory());
        }
    }
});
