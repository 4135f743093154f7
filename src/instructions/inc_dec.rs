//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC / DEC: Increment / Decrement Memory
//! - INX / DEX: Increment / Decrement X
//! - INY / DEY: Increment / Decrement Y
//!
//! All wrap modulo 256 and set Z and N from the new value.

use super::Exec;
use crate::{ExecutionError, MemoryBus};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(|regs, value| {
        let result = value.wrapping_add(1);
        regs.flags.set_zn(result);
        result
    })?;
    Ok(())
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(|regs, value| {
        let result = value.wrapping_sub(1);
        regs.flags.set_zn(result);
        result
    })?;
    Ok(())
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.x = exec.regs.x.wrapping_add(1);
    exec.regs.flags.set_zn(exec.regs.x);
    Ok(())
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.y = exec.regs.y.wrapping_add(1);
    exec.regs.flags.set_zn(exec.regs.y);
    Ok(())
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.x = exec.regs.x.wrapping_sub(1);
    exec.regs.flags.set_zn(exec.regs.x);
    Ok(())
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.y = exec.regs.y.wrapping_sub(1);
    exec.regs.flags.set_zn(exec.regs.y);
    Ok(())
}
