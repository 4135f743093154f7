//! # 6502 Decode-Execute Core
//!
//! A decode-execute engine for MOS 6502 machine code, as found in the NES and
//! its contemporaries. It reproduces the processor's observable behaviour:
//! register and flag updates, memory reads and writes, and control flow.
//!
//! The crate is split into architectural state (registers, flags, a memory bus)
//! and an engine that decodes one instruction from a byte stream, resolves its
//! addressing mode and applies its semantics atomically.
//!
//! ## Quick Start
//!
//! ```rust
//! use core6502::{step, CoreConfig, Flag, State};
//!
//! let mut state = State::new(CoreConfig::default()).unwrap();
//!
//! // LDX #5; CPX #5
//! let program = [0xA2, 0x05, 0xE0, 0x05];
//!
//! let mut cursor = 0;
//! while cursor < program.len() {
//!     cursor = step(&mut state, &program, cursor).unwrap();
//! }
//!
//! assert_eq!(state.x(), 5);
//! assert!(state.get_flag(Flag::Zero));
//! assert!(state.get_flag(Flag::Carry));
//! ```
//!
//! ## Modules
//!
//! - `config` - Session configuration (memory size, address policy, options)
//! - `memory` - MemoryBus trait and the configurable-size FlatMemory
//! - `state` - Registers, flags and memory ownership
//! - `addressing` - Addressing mode enumeration
//! - `opcodes` - Opcode table and mnemonics
//! - `decoder` - Byte stream to `Instruction`
//! - `cpu` - The `Cpu` session, `step` and the run loop

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod decoder;
pub mod memory;
pub mod opcodes;
pub mod state;

// Instruction semantics (only `execute` is public)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use addressing::AddressingMode;
pub use config::{AddressPolicy, CoreConfig, UnknownOpcodePolicy};
pub use cpu::{step, Cpu, RunState, RunSummary, StopReason};
pub use decoder::{decode_at, decode_one, Instruction, MAX_STREAM_LEN};
pub use instructions::execute;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use state::{Flag, Flags, Registers, State};

/// Errors produced while decoding a byte stream. Decoding never touches state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The opcode byte has no entry in the opcode table.
    #[error("unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    /// The stream ends before all operand bytes of the instruction.
    #[error("truncated operand for instruction at offset {offset}")]
    TruncatedOperand { offset: usize },

    /// The cursor is at or past the end of the stream.
    #[error("end of stream at offset {offset}")]
    EndOfStream { offset: usize },

    /// The instruction at `offset` would end beyond the 64 KiB window that
    /// cursors can address from the origin.
    #[error("instruction at offset {offset} extends past the address window")]
    OutsideAddressWindow { offset: usize },
}

/// Errors produced while executing a decoded instruction.
///
/// When `execute` returns one of these, no register, flag or memory cell has
/// been modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The address lies outside memory under `AddressPolicy::Strict`.
    #[error("address 0x{0:04X} is out of bounds")]
    OutOfBoundsAddress(u16),

    /// A halt opcode (JAM, or BRK with `halt_on_brk`) was executed.
    #[error("processor jammed by opcode 0x{opcode:02X} at 0x{address:04X}")]
    Jammed { opcode: u8, address: u16 },

    /// The addressing mode cannot supply what the operation needs. Never
    /// produced for instructions built by the decoder.
    #[error("opcode 0x{opcode:02X} has no operand in addressing mode {mode:?}")]
    InvalidAddressingMode { opcode: u8, mode: AddressingMode },
}

/// Invalid `CoreConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("memory size {0} is outside 1..=65536")]
    InvalidMemorySize(usize),
}

/// Any error from a combined decode + execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The session is halted; only `reset` brings it back.
    #[error("cpu is halted at 0x{pc:04X}")]
    Halted { pc: u16 },
}
