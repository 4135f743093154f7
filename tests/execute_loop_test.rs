//! Tests for the `Cpu` session: run loop, budget, halting and reset.

use core6502::{
    step, CoreConfig, Cpu, DecodeError, Error, ExecutionError, RunState, State, StopReason,
    UnknownOpcodePolicy, MAX_STREAM_LEN,
};

/// Session with its stream mapped at $0600
fn setup() -> Cpu {
    Cpu::new(CoreConfig::default().with_origin(0x0600)).unwrap()
}

#[test]
fn test_run_to_end_of_stream() {
    let mut cpu = setup();

    // LDA #$01; ADC #$02; STA $10
    let program = [0xA9, 0x01, 0x69, 0x02, 0x85, 0x10];
    let summary = cpu.run(&program, None).unwrap();

    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.instructions, 3);
    assert_eq!(summary.cursor, 6);
    assert_eq!(cpu.state().read(0x0010).unwrap(), 0x03);
    assert_eq!(cpu.state().pc(), 0x0606);
}

#[test]
fn test_run_follows_jumps() {
    let mut cpu = setup();

    // $0600: JMP $0605; $0603: LDA #$FF; $0605: LDX #$01
    let program = [0x4C, 0x05, 0x06, 0xA9, 0xFF, 0xA2, 0x01];
    let summary = cpu.run(&program, None).unwrap();

    assert_eq!(summary.instructions, 2);
    assert_eq!(cpu.state().a(), 0x00);
    assert_eq!(cpu.state().x(), 0x01);
}

#[test]
fn test_jump_outside_stream_ends_run() {
    let mut cpu = setup();

    // JMP $0000 lies before the origin
    let summary = cpu.run(&[0x4C, 0x00, 0x00], None).unwrap();

    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(cpu.state().pc(), 0x0000);
    assert!(!cpu.is_halted());
}

#[test]
fn test_budget_stops_infinite_loop() {
    let mut cpu = setup();

    // $0600: INX; BNE -3 (loops 256 times per wrap)
    let program = [0xE8, 0xD0, 0xFD];
    let summary = cpu.run(&program, Some(10)).unwrap();

    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.instructions, 10);
    assert_eq!(cpu.state().x(), 5);

    // Resuming continues from the same cursor
    let summary = cpu.run(&program, Some(4)).unwrap();
    assert_eq!(summary.instructions, 4);
    assert_eq!(cpu.state().x(), 7);
    assert_eq!(cpu.instructions_executed(), 14);
}

#[test]
fn test_zero_budget_executes_nothing() {
    let mut cpu = setup();

    let summary = cpu.run(&[0xEA], Some(0)).unwrap();

    assert_eq!(summary.stop, StopReason::BudgetExhausted);
    assert_eq!(summary.instructions, 0);
    assert_eq!(summary.cursor, 0);
}

#[test]
fn test_jam_stops_run_as_halt() {
    let mut cpu = setup();

    // LDA #$07; JAM; LDA #$00
    let program = [0xA9, 0x07, 0x02, 0xA9, 0x00];
    let summary = cpu.run(&program, None).unwrap();

    assert_eq!(
        summary.stop,
        StopReason::Halted(Error::Execution(ExecutionError::Jammed {
            opcode: 0x02,
            address: 0x0602
        }))
    );
    assert_eq!(summary.instructions, 1);
    assert_eq!(summary.cursor, 2);
    assert_eq!(cpu.state().a(), 0x07);
    assert_eq!(cpu.run_state(), RunState::Halted);

    assert_eq!(
        cpu.run(&program, None).unwrap_err(),
        Error::Halted { pc: 0x0602 }
    );
}

#[test]
fn test_truncated_operand_halts() {
    let mut cpu = setup();

    // NOP; LDA abs with one operand byte missing
    let program = [0xEA, 0xAD, 0x00];
    let summary = cpu.run(&program, None).unwrap();

    assert_eq!(
        summary.stop,
        StopReason::Halted(Error::Decode(DecodeError::TruncatedOperand { offset: 1 }))
    );
    assert!(cpu.is_halted());
}

#[test]
fn test_unknown_opcode_skipped_when_configured() {
    let config = CoreConfig::default().with_unknown_opcode(UnknownOpcodePolicy::Skip);
    let mut cpu = Cpu::new(config).unwrap();

    // Two unstable bytes, then INY
    let summary = cpu.run(&[0xAB, 0xBB, 0xC8], None).unwrap();

    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.instructions, 1);
    assert_eq!(cpu.state().y(), 1);
}

#[test]
fn test_reset_recovers_from_halt() {
    let mut cpu = setup();
    cpu.state_mut().write(0x0010, 0x42).unwrap();

    cpu.run(&[0x02], None).unwrap();
    assert!(cpu.is_halted());

    cpu.reset();

    assert_eq!(cpu.run_state(), RunState::Ready);
    assert_eq!(cpu.state().pc(), 0x0600);
    assert_eq!(cpu.instructions_executed(), 0);
    assert_eq!(cpu.state().read(0x0010).unwrap(), 0x42);
}

#[test]
fn test_step_returns_cursor() {
    let mut cpu = setup();
    let program = [0xA2, 0x05, 0xE0, 0x05];

    assert_eq!(cpu.step(&program).unwrap(), 2);
    assert_eq!(cpu.step(&program).unwrap(), 4);
    assert_eq!(
        cpu.step(&program).unwrap_err(),
        Error::Decode(DecodeError::EndOfStream { offset: 4 })
    );
    assert!(!cpu.is_halted());
}

#[test]
fn test_step_cursor_never_wraps_on_long_stream() {
    let mut state = State::default();
    let program = vec![0xEA; 0x10004];

    assert_eq!(step(&mut state, &program, 0xFFFE).unwrap(), 0xFFFF);

    let before = state.registers();
    assert_eq!(
        step(&mut state, &program, 0x10000).unwrap_err(),
        Error::Decode(DecodeError::OutsideAddressWindow { offset: 0x10000 })
    );
    assert_eq!(state.registers(), before);
}

#[test]
fn test_long_stream_run_terminates() {
    let mut cpu = setup();
    let program = vec![0xEA; 0x10004];

    let summary = cpu.run(&program, None).unwrap();

    assert_eq!(
        summary.stop,
        StopReason::Halted(Error::Decode(DecodeError::OutsideAddressWindow {
            offset: MAX_STREAM_LEN
        }))
    );
    assert_eq!(summary.cursor, MAX_STREAM_LEN);
    assert_eq!(cpu.instructions_executed(), MAX_STREAM_LEN as u64);
}

#[test]
fn test_stream_filling_the_window_ends_normally() {
    let mut cpu = setup();
    let program = vec![0xEA; MAX_STREAM_LEN];

    let summary = cpu.run(&program, None).unwrap();

    assert_eq!(summary.stop, StopReason::EndOfStream);
    assert_eq!(summary.cursor, MAX_STREAM_LEN);
}
