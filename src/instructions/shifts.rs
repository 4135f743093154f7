//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator (Accumulator mode) or on memory
//! (read-modify-write). The bit shifted out lands in C; Z and N follow the
//! result.

use super::Exec;
use crate::state::Registers;
use crate::{ExecutionError, MemoryBus};

pub(crate) fn asl(regs: &mut Registers, value: u8) -> u8 {
    regs.flags.c = value & 0x80 != 0;
    let result = value << 1;
    regs.flags.set_zn(result);
    result
}

pub(crate) fn lsr(regs: &mut Registers, value: u8) -> u8 {
    regs.flags.c = value & 0x01 != 0;
    let result = value >> 1;
    regs.flags.set_zn(result);
    result
}

pub(crate) fn rol(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = regs.flags.c as u8;
    regs.flags.c = value & 0x80 != 0;
    let result = (value << 1) | carry_in;
    regs.flags.set_zn(result);
    result
}

pub(crate) fn ror(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = (regs.flags.c as u8) << 7;
    regs.flags.c = value & 0x01 != 0;
    let result = (value >> 1) | carry_in;
    regs.flags.set_zn(result);
    result
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(asl)?;
    Ok(())
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(crate) fn execute_lsr<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(lsr)?;
    Ok(())
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(rol)?;
    Ok(())
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.modify(ror)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_through_carry() {
        let mut regs = Registers::default();
        regs.flags.c = true;

        assert_eq!(rol(&mut regs, 0x80), 0x01);
        assert!(regs.flags.c);

        assert_eq!(ror(&mut regs, 0x01), 0x80);
        assert!(regs.flags.c);
        assert!(regs.flags.n);
    }

    #[test]
    fn test_shift_out_to_zero() {
        let mut regs = Registers::default();

        assert_eq!(asl(&mut regs, 0x80), 0x00);
        assert!(regs.flags.c);
        assert!(regs.flags.z);

        assert_eq!(lsr(&mut regs, 0x01), 0x00);
        assert!(regs.flags.c);
        assert!(regs.flags.z);
        assert!(!regs.flags.n);
    }
}
