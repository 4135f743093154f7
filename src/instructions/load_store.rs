//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//!
//! Loads set Z and N from the loaded value and never touch C or V.
//! Stores affect no flags.

use super::Exec;
use crate::{ExecutionError, MemoryBus};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.a = value;
    exec.regs.flags.set_zn(value);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.x = value;
    exec.regs.flags.set_zn(value);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.y = value;
    exec.regs.flags.set_zn(value);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let addr = exec.effective_address()?;
    exec.write(addr, exec.regs.a)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let addr = exec.effective_address()?;
    exec.write(addr, exec.regs.x)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let addr = exec.effective_address()?;
    exec.write(addr, exec.regs.y)
}
