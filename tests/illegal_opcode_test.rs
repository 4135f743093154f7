//! Tests for the stable undocumented opcodes.
//!
//! Tests cover:
//! - Read-modify-write compositions (SLO, RLA, SRE, RRA, DCP, ISC)
//! - SAX and LAX
//! - Immediate combinations (ANC, ALR, ARR, SBX)
//! - Multi-byte NOPs consuming operands
//! - JAM and the unstable opcodes left undecodable

use core6502::{decode_one, step, DecodeError, Error, ExecutionError, Flag, State};

fn setup() -> State {
    State::default()
}

fn exec(state: &mut State, bytes: &[u8]) -> usize {
    step(state, bytes, 0).unwrap()
}

// ========== Read-modify-write compositions ==========

#[test]
fn test_slo_shifts_then_ors() {
    let mut state = setup();
    state.set_a(0x01);
    state.write(0x0010, 0x81).unwrap();

    // SLO $10
    exec(&mut state, &[0x07, 0x10]);

    assert_eq!(state.read(0x0010).unwrap(), 0x02);
    assert_eq!(state.a(), 0x03);
    assert!(state.get_flag(Flag::Carry));
}

#[test]
fn test_rla_rotates_then_ands() {
    let mut state = setup();
    state.set_a(0xFF);
    state.set_flag(Flag::Carry, true);
    state.write(0x0010, 0x40).unwrap();

    // RLA $10
    exec(&mut state, &[0x27, 0x10]);

    assert_eq!(state.read(0x0010).unwrap(), 0x81);
    assert_eq!(state.a(), 0x81);
    assert!(!state.get_flag(Flag::Carry));
    assert!(state.get_flag(Flag::Negative));
}

#[test]
fn test_sre_shifts_then_eors() {
    let mut state = setup();
    state.set_a(0x01);
    state.write(0x0300, 0x03).unwrap();

    // SRE $0300
    exec(&mut state, &[0x4F, 0x00, 0x03]);

    assert_eq!(state.read(0x0300).unwrap(), 0x01);
    assert_eq!(state.a(), 0x00);
    assert!(state.get_flag(Flag::Zero));
    assert!(state.get_flag(Flag::Carry));
}

#[test]
fn test_rra_adds_with_rotate_carry() {
    let mut state = setup();
    state.set_a(0x10);
    state.write(0x0010, 0x03).unwrap();

    // RRA $10: ROR gives $01 with C=1, then A = $10 + $01 + 1
    exec(&mut state, &[0x67, 0x10]);

    assert_eq!(state.read(0x0010).unwrap(), 0x01);
    assert_eq!(state.a(), 0x12);
    assert!(!state.get_flag(Flag::Carry));
}

#[test]
fn test_dcp_decrements_then_compares() {
    let mut state = setup();
    state.set_a(0x41);
    state.write(0x0010, 0x42).unwrap();

    // DCP $10
    exec(&mut state, &[0xC7, 0x10]);

    assert_eq!(state.read(0x0010).unwrap(), 0x41);
    assert!(state.get_flag(Flag::Zero));
    assert!(state.get_flag(Flag::Carry));
    assert_eq!(state.a(), 0x41);
}

#[test]
fn test_isc_increments_then_subtracts() {
    let mut state = setup();
    state.set_a(0x10);
    state.set_flag(Flag::Carry, true);
    state.write(0x0010, 0x04).unwrap();

    // ISC $10
    exec(&mut state, &[0xE7, 0x10]);

    assert_eq!(state.read(0x0010).unwrap(), 0x05);
    assert_eq!(state.a(), 0x0B);
    assert!(state.get_flag(Flag::Carry));
}

#[test]
fn test_dcp_indirect_y() {
    let mut state = setup();
    state.set_y(0x01);
    state.set_a(0x00);
    state.write(0x0020, 0x00).unwrap();
    state.write(0x0021, 0x02).unwrap();
    state.write(0x0201, 0x00).unwrap();

    // DCP ($20),Y
    exec(&mut state, &[0xD3, 0x20]);

    assert_eq!(state.read(0x0201).unwrap(), 0xFF);
    assert!(!state.get_flag(Flag::Carry));
}

// ========== SAX / LAX ==========

#[test]
fn test_sax_stores_a_and_x() {
    let mut state = setup();
    state.set_a(0xF0);
    state.set_x(0x3C);
    let status = state.status();

    // SAX $10
    exec(&mut state, &[0x87, 0x10]);

    assert_eq!(state.read(0x0010).unwrap(), 0x30);
    assert_eq!(state.status(), status);
}

#[test]
fn test_lax_loads_both() {
    let mut state = setup();
    state.write(0x0010, 0x80).unwrap();

    // LAX $10
    exec(&mut state, &[0xA7, 0x10]);

    assert_eq!(state.a(), 0x80);
    assert_eq!(state.x(), 0x80);
    assert!(state.get_flag(Flag::Negative));
}

// ========== Immediate combinations ==========

#[test]
fn test_anc_copies_negative_to_carry() {
    let mut state = setup();
    state.set_a(0xFF);

    // ANC #$80
    exec(&mut state, &[0x0B, 0x80]);

    assert_eq!(state.a(), 0x80);
    assert!(state.get_flag(Flag::Carry));
    assert!(state.get_flag(Flag::Negative));
}

#[test]
fn test_alr_ands_then_shifts() {
    let mut state = setup();
    state.set_a(0xFF);

    // ALR #$03
    exec(&mut state, &[0x4B, 0x03]);

    assert_eq!(state.a(), 0x01);
    assert!(state.get_flag(Flag::Carry));
}

#[test]
fn test_arr_flags_from_bits_6_and_5() {
    let mut state = setup();
    state.set_a(0xFF);
    state.set_flag(Flag::Carry, true);

    // ARR #$80: (A & $80) ror with C=1 -> $C0
    exec(&mut state, &[0x6B, 0x80]);

    assert_eq!(state.a(), 0xC0);
    assert!(state.get_flag(Flag::Carry));
    assert!(state.get_flag(Flag::Overflow));
    assert!(state.get_flag(Flag::Negative));
}

#[test]
fn test_sbx_subtracts_from_a_and_x() {
    let mut state = setup();
    state.set_a(0x0F);
    state.set_x(0xFC);

    // SBX #$02: X = ($0F & $FC) - 2
    exec(&mut state, &[0xCB, 0x02]);

    assert_eq!(state.x(), 0x0A);
    assert!(state.get_flag(Flag::Carry));
    assert_eq!(state.a(), 0x0F);
}

// ========== NOPs ==========

#[test]
fn test_multibyte_nops_consume_operands() {
    let cases: [(&[u8], usize); 4] = [
        (&[0x1A], 1),             // NOP implied
        (&[0x80, 0xFF], 2),       // NOP #imm
        (&[0x04, 0x10], 2),       // NOP zp
        (&[0x1C, 0x00, 0x02], 3), // NOP abs,X
    ];

    for (bytes, size) in cases {
        let mut state = setup();
        state.write(0x0010, 0x55).unwrap();
        let before = state.clone();

        let next = exec(&mut state, bytes);

        assert_eq!(next, size);
        assert_eq!(state.memory(), before.memory());
        assert_eq!(state.status(), before.status());
        assert_eq!(state.a(), before.a());
    }
}

#[test]
fn test_undocumented_marker() {
    let (instr, _) = decode_one(&[0x07, 0x10], 0).unwrap();
    assert!(instr.is_undocumented());

    let (instr, _) = decode_one(&[0xA9, 0x10], 0).unwrap();
    assert!(!instr.is_undocumented());
}

// ========== JAM and unstable opcodes ==========

#[test]
fn test_jam_mutates_nothing() {
    for opcode in [0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2] {
        let mut state = setup();
        let before = state.registers();

        let err = step(&mut state, &[opcode], 0).unwrap_err();

        assert_eq!(
            err,
            Error::Execution(ExecutionError::Jammed {
                opcode,
                address: 0x0000
            })
        );
        assert_eq!(state.registers(), before);
    }
}

#[test]
fn test_unstable_opcodes_are_unknown() {
    for opcode in [0x8B, 0x93, 0x9B, 0x9C, 0x9E, 0x9F, 0xAB, 0xBB] {
        let mut state = setup();
        let before = state.clone();

        let err = step(&mut state, &[opcode, 0x00, 0x00], 0).unwrap_err();

        assert_eq!(
            err,
            Error::Decode(DecodeError::UnknownOpcode { opcode, offset: 0 })
        );
        assert_eq!(state.registers(), before.registers());
        assert_eq!(state.memory(), before.memory());
    }
}
