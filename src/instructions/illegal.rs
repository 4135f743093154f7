//! # Undocumented Opcodes
//!
//! The stable NMOS undocumented instructions. Most are a read-modify-write
//! followed by an ALU operation on the result:
//!
//! | Mnemonic | Composition           |
//! |----------|-----------------------|
//! | SLO      | ASL M, then ORA M     |
//! | RLA      | ROL M, then AND M     |
//! | SRE      | LSR M, then EOR M     |
//! | RRA      | ROR M, then ADC M     |
//! | DCP      | DEC M, then CMP M     |
//! | ISC      | INC M, then SBC M     |
//!
//! The immediate-only group (ANC, ALR, ARR, SBX) combines AND with a shift or
//! a subtraction. SAX stores A & X, LAX loads A and X together, and JAM locks
//! the processor.
//!
//! Multi-byte NOPs and USBC are routed to `control::execute_nop` and
//! `alu::execute_sbc` respectively.

use super::alu::{add_with_carry, compare, subtract_with_borrow};
use super::shifts::{asl, lsr, rol, ror};
use super::Exec;
use crate::{ExecutionError, MemoryBus};

/// SLO: shift memory left, then OR the result into A.
pub(crate) fn execute_slo<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(|regs, value| {
        let result = asl(regs, value);
        regs.a |= result;
        regs.flags.set_zn(regs.a);
        result
    })?;
    Ok(())
}

/// RLA: rotate memory left, then AND the result into A.
pub(crate) fn execute_rla<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(|regs, value| {
        let result = rol(regs, value);
        regs.a &= result;
        regs.flags.set_zn(regs.a);
        result
    })?;
    Ok(())
}

/// SRE: shift memory right, then EOR the result into A.
pub(crate) fn execute_sre<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(|regs, value| {
        let result = lsr(regs, value);
        regs.a ^= result;
        regs.flags.set_zn(regs.a);
        result
    })?;
    Ok(())
}

/// RRA: rotate memory right, then add the result to A using the carry the
/// rotate produced.
pub(crate) fn execute_rra<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let decimal = exec.config().decimal_mode;
    exec.modify(|regs, value| {
        let result = ror(regs, value);
        add_with_carry(regs, result, decimal);
        result
    })?;
    Ok(())
}

/// SAX: store A & X. Flags affected: None.
pub(crate) fn execute_sax<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let addr = exec.effective_address()?;
    let value = exec.regs.a & exec.regs.x;
    exec.write(addr, value)
}

/// LAX: load the same value into A and X.
pub(crate) fn execute_lax<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.a = value;
    exec.regs.x = value;
    exec.regs.flags.set_zn(value);
    Ok(())
}

/// DCP: decrement memory, then compare A with the result.
pub(crate) fn execute_dcp<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(|regs, value| {
        let result = value.wrapping_sub(1);
        let a = regs.a;
        compare(regs, a, result);
        result
    })?;
    Ok(())
}

/// ISC: increment memory, then subtract the result from A.
pub(crate) fn execute_isc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let decimal = exec.config().decimal_mode;
    exec.modify(|regs, value| {
        let result = value.wrapping_add(1);
        subtract_with_borrow(regs, result, decimal);
        result
    })?;
    Ok(())
}

/// ANC: AND immediate, then copy N into C.
pub(crate) fn execute_anc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.a &= value;
    exec.regs.flags.set_zn(exec.regs.a);
    exec.regs.flags.c = exec.regs.flags.n;
    Ok(())
}

/// ALR: AND immediate, then LSR A.
pub(crate) fn execute_alr<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let masked = exec.regs.a & value;
    exec.regs.a = lsr(&mut exec.regs, masked);
    Ok(())
}

/// ARR: AND immediate, then ROR A.
///
/// C takes bit 6 of the result and V is bit 6 XOR bit 5.
pub(crate) fn execute_arr<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let masked = exec.regs.a & value;
    let result = ror(&mut exec.regs, masked);
    exec.regs.a = result;
    exec.regs.flags.c = result & 0x40 != 0;
    exec.regs.flags.v = ((result >> 6) ^ (result >> 5)) & 0x01 != 0;
    Ok(())
}

/// SBX: X = (A & X) - immediate, without borrow.
///
/// C is set like CMP (no borrow); Z and N follow the new X. V is unaffected.
pub(crate) fn execute_sbx<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let masked = exec.regs.a & exec.regs.x;
    compare(&mut exec.regs, masked, value);
    exec.regs.x = masked.wrapping_sub(value);
    Ok(())
}

/// JAM: locks the processor. Nothing is committed.
pub(crate) fn execute_jam<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    Err(ExecutionError::Jammed {
        opcode: exec.instr.opcode(),
        address: exec.instr.address(),
    })
}
