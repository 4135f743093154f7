//! # CPU Session and Execution Loop
//!
//! This module ties decoding and execution together.
//!
//! - [`step`] decodes the instruction at a stream offset, executes it and
//!   returns the offset of the next instruction.
//! - [`Cpu`] owns one [`State`] and adds the Ready/Halted state machine, an
//!   instruction counter and a budgeted run loop.
//!
//! ## Cursor
//!
//! A byte stream is mapped into the address space at `CoreConfig::origin`.
//! The cursor is the stream offset of the next instruction and always equals
//! `PC - origin`, so branches and jumps move the cursor by moving PC.
//!
//! ## Halting
//!
//! The session halts on JAM, on BRK with `halt_on_brk`, on a truncated
//! operand, on an instruction past [`MAX_STREAM_LEN`](crate::MAX_STREAM_LEN)
//! and, under `UnknownOpcodePolicy::Halt`, on an unknown opcode.
//! Once halted every step returns `Error::Halted` until `reset`.

use crate::config::{CoreConfig, UnknownOpcodePolicy};
use crate::decoder::decode_at;
use crate::instructions::execute;
use crate::memory::{FlatMemory, MemoryBus};
use crate::state::State;
use crate::{ConfigError, DecodeError, Error, ExecutionError};

/// Decodes and executes one instruction at `offset` in `bytes`.
///
/// The instruction's address is `origin + offset`. Returns the next cursor
/// (`PC - origin`), which is `offset + size` unless the instruction
/// transferred control.
///
/// # Errors
///
/// Any decode or execution error. State is unchanged whenever an error is
/// returned.
///
/// # Examples
///
/// ```
/// use core6502::{step, State};
///
/// let mut state = State::default();
/// // JSR $0010
/// let next = step(&mut state, &[0x20, 0x10, 0x00], 0).unwrap();
///
/// assert_eq!(next, 0x10);
/// assert_eq!(state.read(0x01FD).unwrap(), 0x00);
/// assert_eq!(state.read(0x01FC).unwrap(), 0x02);
/// ```
pub fn step<M: MemoryBus>(state: &mut State<M>, bytes: &[u8], offset: usize) -> Result<usize, Error> {
    let origin = state.config().origin;
    let (instruction, _) = decode_at(bytes, offset, origin)?;
    execute(state, &instruction)?;
    Ok(state.pc().wrapping_sub(origin) as usize)
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Ready,
    Halted,
}

/// Why `Cpu::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cursor reached or passed the end of the stream.
    EndOfStream,
    /// The session halted; the error that caused it is attached.
    Halted(Error),
    /// The instruction budget ran out.
    BudgetExhausted,
}

/// Outcome of a `Cpu::run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed during this call.
    pub instructions: u64,
    pub stop: StopReason,
    /// Cursor after the last instruction.
    pub cursor: usize,
}

/// A 6502 execution session.
///
/// Generic over the memory implementation via the `MemoryBus` trait, like
/// [`State`].
///
/// # Examples
///
/// ```
/// use core6502::{CoreConfig, Cpu, StopReason};
///
/// // LDX #0; INX; CPX #3; BNE -5
/// let program = [0xA2, 0x00, 0xE8, 0xE0, 0x03, 0xD0, 0xFB];
///
/// let mut cpu = Cpu::new(CoreConfig::default()).unwrap();
/// let summary = cpu.run(&program, None).unwrap();
///
/// assert_eq!(summary.stop, StopReason::EndOfStream);
/// assert_eq!(summary.instructions, 10);
/// assert_eq!(cpu.state().x(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Cpu<M: MemoryBus = FlatMemory> {
    state: State<M>,
    run_state: RunState,
    instructions: u64,
}

impl Cpu<FlatMemory> {
    /// Creates a session with a zeroed `FlatMemory` sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn new(config: CoreConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_state(State::new(config)?))
    }
}

impl Default for Cpu<FlatMemory> {
    fn default() -> Self {
        Self::from_state(State::default())
    }
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a session over an existing memory bus.
    pub fn with_memory(memory: M, config: CoreConfig) -> Self {
        Self::from_state(State::with_memory(memory, config))
    }

    /// Wraps an already prepared state. The session starts Ready.
    pub fn from_state(state: State<M>) -> Self {
        Self {
            state,
            run_state: RunState::Ready,
            instructions: 0,
        }
    }

    pub fn state(&self) -> &State<M> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State<M> {
        &mut self.state
    }

    pub fn into_state(self) -> State<M> {
        self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    /// Total instructions executed since creation or the last reset.
    pub fn instructions_executed(&self) -> u64 {
        self.instructions
    }

    /// Stream offset of the next instruction (`PC - origin`).
    pub fn cursor(&self) -> usize {
        self.state.pc().wrapping_sub(self.state.config().origin) as usize
    }

    /// Restores power-on registers and returns to Ready. Memory is kept.
    pub fn reset(&mut self) {
        self.state.reset();
        self.run_state = RunState::Ready;
        self.instructions = 0;
        log::debug!("reset: pc={:04X}", self.state.pc());
    }

    /// Executes the instruction at the cursor and returns the new cursor.
    ///
    /// # Errors
    ///
    /// - `Error::Halted` if the session is already halted
    /// - Decode and execution errors. Those that halt the session (see the
    ///   module docs) switch it to Halted before being returned.
    ///
    /// An unknown opcode under `UnknownOpcodePolicy::Skip` is not an error:
    /// PC moves past the byte and a warning is logged.
    pub fn step(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        if self.is_halted() {
            return Err(Error::Halted { pc: self.state.pc() });
        }

        let cursor = self.cursor();
        match step(&mut self.state, bytes, cursor) {
            Ok(cursor) => {
                self.instructions += 1;
                Ok(cursor)
            }
            Err(Error::Decode(DecodeError::UnknownOpcode { opcode, offset }))
                if self.state.config().unknown_opcode == UnknownOpcodePolicy::Skip =>
            {
                log::warn!(
                    "skipping unknown opcode {:02X} at {:04X} (offset {})",
                    opcode,
                    self.state.pc(),
                    offset
                );
                let pc = self.state.pc().wrapping_add(1);
                self.state.set_pc(pc);
                Ok(self.cursor())
            }
            Err(err) => {
                if halts(&err) {
                    self.run_state = RunState::Halted;
                    log::debug!("halted at {:04X}: {}", self.state.pc(), err);
                }
                Err(err)
            }
        }
    }

    /// Steps until the end of the stream, a halt or the instruction budget.
    ///
    /// Halting is a normal stop and is reported through
    /// `StopReason::Halted`.
    ///
    /// # Errors
    ///
    /// - `Error::Halted` if the session is halted on entry
    /// - `OutOfBoundsAddress`, which leaves the session Ready at the failing
    ///   instruction
    pub fn run(&mut self, bytes: &[u8], budget: Option<u64>) -> Result<RunSummary, Error> {
        if self.is_halted() {
            return Err(Error::Halted { pc: self.state.pc() });
        }

        let mut executed = 0u64;
        let stop = loop {
            if budget.is_some_and(|limit| executed >= limit) {
                break StopReason::BudgetExhausted;
            }
            if self.cursor() >= bytes.len() {
                break StopReason::EndOfStream;
            }

            let before = self.instructions;
            match self.step(bytes) {
                Ok(_) => executed += self.instructions - before,
                Err(err) if self.is_halted() => break StopReason::Halted(err),
                Err(err) => return Err(err),
            }
        };

        log::debug!("run stopped: {:?} after {} instructions", stop, executed);

        Ok(RunSummary {
            instructions: executed,
            stop,
            cursor: self.cursor(),
        })
    }
}

/// Errors that move the session to Halted.
fn halts(err: &Error) -> bool {
    matches!(
        err,
        Error::Decode(DecodeError::UnknownOpcode { .. })
            | Error::Decode(DecodeError::TruncatedOperand { .. })
            | Error::Decode(DecodeError::OutsideAddressWindow { .. })
            | Error::Execution(ExecutionError::Jammed { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddressPolicy;
    use crate::state::Flag;

    #[test]
    fn test_power_on_state() {
        let cpu = Cpu::default();
        let state = cpu.state();

        assert_eq!(state.pc(), 0x0000);
        assert_eq!(state.sp(), 0xFD);
        assert_eq!(state.a(), 0x00);
        assert!(state.get_flag(Flag::InterruptDisable));
        assert_eq!(cpu.run_state(), RunState::Ready);
        assert_eq!(cpu.instructions_executed(), 0);
    }

    #[test]
    fn test_into_state_keeps_progress() {
        let config = CoreConfig::default().with_initial_sp(0xFF);
        let mut cpu = Cpu::new(config).unwrap();
        // PHA
        cpu.step(&[0x48]).unwrap();

        let state = cpu.into_state();
        assert_eq!(state.sp(), 0xFE);
        assert_eq!(state.pc(), 0x0001);
    }

    #[test]
    fn test_cursor_follows_origin() {
        let config = CoreConfig::default().with_origin(0x0600);
        let mut cpu = Cpu::new(config).unwrap();
        assert_eq!(cpu.cursor(), 0);

        // NOP; JMP $0600
        let program = [0xEA, 0x4C, 0x00, 0x06];
        assert_eq!(cpu.step(&program).unwrap(), 1);
        assert_eq!(cpu.step(&program).unwrap(), 0);
        assert_eq!(cpu.state().pc(), 0x0600);
    }

    #[test]
    fn test_jam_halts_until_reset() {
        let mut cpu = Cpu::default();
        cpu.state_mut().set_a(0x11);

        let err = cpu.step(&[0x02]).unwrap_err();
        assert_eq!(
            err,
            Error::Execution(ExecutionError::Jammed {
                opcode: 0x02,
                address: 0x0000
            })
        );
        assert!(cpu.is_halted());
        assert_eq!(cpu.state().a(), 0x11);
        assert_eq!(cpu.state().pc(), 0x0000);

        assert_eq!(cpu.step(&[0xEA]), Err(Error::Halted { pc: 0x0000 }));

        cpu.reset();
        assert!(!cpu.is_halted());
        assert_eq!(cpu.state().a(), 0x00);
    }

    #[test]
    fn test_unknown_opcode_skip_policy() {
        let config = CoreConfig::default().with_unknown_opcode(UnknownOpcodePolicy::Skip);
        let mut cpu = Cpu::new(config).unwrap();

        // Unstable opcode, then LDA #1
        let program = [0x8B, 0xA9, 0x01];
        let summary = cpu.run(&program, None).unwrap();

        assert_eq!(summary.stop, StopReason::EndOfStream);
        assert_eq!(summary.instructions, 1);
        assert_eq!(cpu.state().a(), 0x01);
    }

    #[test]
    fn test_unknown_opcode_halt_policy() {
        let mut cpu = Cpu::default();
        let before = cpu.state().registers();

        let summary = cpu.run(&[0x9E, 0x00, 0x00], None).unwrap();

        assert_eq!(
            summary.stop,
            StopReason::Halted(Error::Decode(DecodeError::UnknownOpcode {
                opcode: 0x9E,
                offset: 0
            }))
        );
        assert_eq!(cpu.state().registers(), before);
    }

    #[test]
    fn test_end_of_stream_does_not_halt() {
        let mut cpu = Cpu::default();

        let err = cpu.step(&[]).unwrap_err();
        assert_eq!(err, Error::Decode(DecodeError::EndOfStream { offset: 0 }));
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_long_stream_halts_at_address_window() {
        let mut cpu = Cpu::default();
        let program = vec![0xEA; 0x10004];

        let summary = cpu.run(&program, None).unwrap();

        assert_eq!(
            summary.stop,
            StopReason::Halted(Error::Decode(DecodeError::OutsideAddressWindow {
                offset: 0xFFFF
            }))
        );
        assert_eq!(summary.instructions, 0xFFFF);
        assert_eq!(summary.cursor, 0xFFFF);
        assert!(cpu.is_halted());
    }

    #[test]
    fn test_run_budget() {
        let mut cpu = Cpu::default();
        // JMP $0000 forever
        let program = [0x4C, 0x00, 0x00];

        let summary = cpu.run(&program, Some(100)).unwrap();
        assert_eq!(summary.stop, StopReason::BudgetExhausted);
        assert_eq!(summary.instructions, 100);
        assert_eq!(cpu.instructions_executed(), 100);
    }

    #[test]
    fn test_out_of_bounds_keeps_session_ready() {
        let config = CoreConfig::default().with_address_policy(AddressPolicy::Strict);
        let mut cpu = Cpu::new(config).unwrap();

        // LDA #1; STA $4000
        let program = [0xA9, 0x01, 0x8D, 0x00, 0x40];
        let err = cpu.run(&program, None).unwrap_err();

        assert_eq!(
            err,
            Error::Execution(ExecutionError::OutOfBoundsAddress(0x4000))
        );
        assert!(!cpu.is_halted());
        assert_eq!(cpu.cursor(), 2);
        assert_eq!(cpu.instructions_executed(), 1);
    }
}
