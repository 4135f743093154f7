//! # Status Flag Instructions
//!
//! This module implements the flag set/clear operations:
//! - CLC / SEC: Clear / Set Carry
//! - CLI / SEI: Clear / Set Interrupt Disable
//! - CLD / SED: Clear / Set Decimal Mode
//! - CLV: Clear Overflow
//!
//! All are implied-mode, single-byte instructions touching exactly one flag.

use super::Exec;
use crate::{ExecutionError, MemoryBus};

/// Executes the CLC (Clear Carry Flag) instruction.
pub(crate) fn execute_clc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.c = false;
    Ok(())
}

/// Executes the SEC (Set Carry Flag) instruction.
pub(crate) fn execute_sec<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.c = true;
    Ok(())
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
pub(crate) fn execute_cli<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.i = false;
    Ok(())
}

/// Executes the SEI (Set Interrupt Disable) instruction.
pub(crate) fn execute_sei<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.i = true;
    Ok(())
}

/// Executes the CLD (Clear Decimal Mode) instruction.
pub(crate) fn execute_cld<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.d = false;
    Ok(())
}

/// Executes the SED (Set Decimal Mode) instruction.
///
/// The flag is stored even when the configuration disables BCD arithmetic.
pub(crate) fn execute_sed<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.d = true;
    Ok(())
}

/// Executes the CLV (Clear Overflow Flag) instruction.
pub(crate) fn execute_clv<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.flags.v = false;
    Ok(())
}
