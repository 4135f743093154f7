//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status on Stack
//! - PLA: Pull Accumulator from Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. A push writes to 0x0100 | SP and then decrements SP; a pull increments
//! SP and then reads. SP wraps within 0x00-0xFF.

use super::Exec;
use crate::state::Flags;
use crate::{ExecutionError, MemoryBus};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Flags affected: None
pub(crate) fn execute_pha<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let a = exec.regs.a;
    exec.push(a)
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte always has B (bit 4) and bit 5 set; the live flags are
/// unchanged.
pub(crate) fn execute_php<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let status = exec.regs.flags.to_byte() | 0b0011_0000;
    exec.push(status)
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Sets Z and N from the pulled value.
pub(crate) fn execute_pla<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.pull()?;
    exec.regs.a = value;
    exec.regs.flags.set_zn(value);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Loads N, V, B, D, I, Z and C from the pulled byte; bit 5 is ignored.
pub(crate) fn execute_plp<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let status = exec.pull()?;
    exec.regs.flags = Flags::from_byte(status);
    Ok(())
}
