//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND: Logical AND
//! - ORA: Logical Inclusive OR
//! - EOR: Exclusive OR
//! - BIT: Bit Test
//! - CMP, CPX, CPY: Compare register with memory
//!
//! The arithmetic cores (`add_with_carry`, `subtract_with_borrow`, `compare`)
//! are shared with the undocumented composite opcodes in `illegal`.

use super::Exec;
use crate::state::Registers;
use crate::{ExecutionError, MemoryBus};

/// A + M + C into A, updating C, Z, V, N.
///
/// In decimal mode (D set and enabled in the configuration) the NMOS BCD
/// adjustment applies: Z reflects the binary sum, N and V the intermediate
/// result after low-nibble adjustment.
pub(crate) fn add_with_carry(regs: &mut Registers, value: u8, decimal_enabled: bool) {
    let a = regs.a;
    let carry_in = regs.flags.c as u16;
    let binary = a as u16 + value as u16 + carry_in;
    let result = binary as u8;

    if decimal_enabled && regs.flags.d {
        let mut lo = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry_in;
        let mut hi = (a >> 4) as u16 + (value >> 4) as u16;
        if lo > 0x09 {
            lo += 0x06;
        }
        if lo > 0x0F {
            hi += 1;
        }

        let intermediate = ((hi << 4) | (lo & 0x0F)) as u8;
        regs.flags.z = result == 0;
        regs.flags.n = intermediate & 0x80 != 0;
        regs.flags.v = (a ^ intermediate) & !(a ^ value) & 0x80 != 0;

        if hi > 0x09 {
            hi += 0x06;
        }
        regs.flags.c = hi > 0x0F;
        regs.a = ((hi << 4) | (lo & 0x0F)) as u8;
    } else {
        regs.flags.c = binary > 0xFF;
        // Both operands share a sign that the result does not
        regs.flags.v = (a ^ result) & (value ^ result) & 0x80 != 0;
        regs.flags.set_zn(result);
        regs.a = result;
    }
}

/// A - M - !C into A, updating C (no borrow), Z, V, N.
///
/// Flags always come from the binary difference; in decimal mode only the
/// stored result is BCD-adjusted (NMOS behavior).
pub(crate) fn subtract_with_borrow(regs: &mut Registers, value: u8, decimal_enabled: bool) {
    let a = regs.a;
    let borrow = (!regs.flags.c) as u16;
    let binary = (a as u16).wrapping_sub(value as u16).wrapping_sub(borrow);
    let result = binary as u8;

    regs.flags.c = binary < 0x100;
    regs.flags.v = (a ^ value) & (a ^ result) & 0x80 != 0;
    regs.flags.set_zn(result);

    regs.a = if decimal_enabled && regs.flags.d {
        let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow as i16;
        let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
        if lo < 0 {
            lo -= 0x06;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 0x06;
        }
        ((hi << 4) | (lo & 0x0F)) as u8
    } else {
        result
    };
}

/// Compares `register` with `value`: C = register >= value (unsigned),
/// Z = equal, N = bit 7 of the wrapping difference.
pub(crate) fn compare(regs: &mut Registers, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    regs.flags.c = register >= value;
    regs.flags.set_zn(result);
}

/// Executes the ADC (Add with Carry) instruction.
pub(crate) fn execute_adc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let decimal = exec.config().decimal_mode;
    add_with_carry(&mut exec.regs, value, decimal);
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Also covers the undocumented USBC (0xEB), which behaves identically to SBC
/// immediate.
pub(crate) fn execute_sbc<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let decimal = exec.config().decimal_mode;
    subtract_with_borrow(&mut exec.regs, value, decimal);
    Ok(())
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.a &= value;
    exec.regs.flags.set_zn(exec.regs.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.a |= value;
    exec.regs.flags.set_zn(exec.regs.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.a ^= value;
    exec.regs.flags.set_zn(exec.regs.a);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A & M = 0
/// - Overflow (V): Bit 6 of M
/// - Negative (N): Bit 7 of M
/// - A is not modified
pub(crate) fn execute_bit<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    exec.regs.flags.z = exec.regs.a & value == 0;
    exec.regs.flags.v = value & 0x40 != 0;
    exec.regs.flags.n = value & 0x80 != 0;
    Ok(())
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let a = exec.regs.a;
    compare(&mut exec.regs, a, value);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let x = exec.regs.x;
    compare(&mut exec.regs, x, value);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let value = exec.operand_value()?;
    let y = exec.regs.y;
    compare(&mut exec.regs, y, value);
    Ok(())
}
