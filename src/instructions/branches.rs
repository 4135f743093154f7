//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BPL / BMI: Branch on Negative clear / set
//! - BVC / BVS: Branch on Overflow clear / set
//! - BCC / BCS: Branch on Carry clear / set
//! - BNE / BEQ: Branch on Zero clear / set
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the following instruction. No flags are
//! affected.

use super::Exec;
use crate::{ExecutionError, MemoryBus};

/// Sets PC to the relative target if `taken`; otherwise PC already points at
/// the next instruction.
fn branch<M: MemoryBus>(exec: &mut Exec<'_, M>, taken: bool) -> Result<(), ExecutionError> {
    if taken {
        exec.regs.pc = exec.branch_target();
    }
    Ok(())
}

pub(crate) fn execute_bpl<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = !exec.regs.flags.n;
    branch(exec, taken)
}

pub(crate) fn execute_bmi<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = exec.regs.flags.n;
    branch(exec, taken)
}

pub(crate) fn execute_bvc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = !exec.regs.flags.v;
    branch(exec, taken)
}

pub(crate) fn execute_bvs<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = exec.regs.flags.v;
    branch(exec, taken)
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn execute_bcc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = !exec.regs.flags.c;
    branch(exec, taken)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = exec.regs.flags.c;
    branch(exec, taken)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = !exec.regs.flags.z;
    branch(exec, taken)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let taken = exec.regs.flags.z;
    branch(exec, taken)
}
