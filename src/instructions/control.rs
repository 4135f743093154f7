//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address (absolute or indirect)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - RTI: Return from Interrupt
//! - BRK: Force Interrupt
//! - NOP: No Operation (documented and undocumented variants)
//!
//! JSR pushes the address of its own last byte (next instruction - 1), high
//! byte first; RTS pulls it and adds one.

use super::Exec;
use crate::state::Flags;
use crate::{AddressingMode, ExecutionError, MemoryBus};

/// IRQ/BRK vector location.
const IRQ_VECTOR: u16 = 0xFFFE;

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234 - Jump to address $1234
/// - Indirect (0x6C): JMP ($1234) - Jump to address stored at $1234/$1235,
///   with the NMOS page-wrap bug when the pointer ends in $FF
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    exec.regs.pc = exec.effective_address()?;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes (next instruction - 1), then sets PC to the absolute target.
pub(crate) fn execute_jsr<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let target = exec.effective_address()?;
    let return_address = exec.regs.pc.wrapping_sub(1);
    exec.push_word(return_address)?;
    exec.regs.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let return_address = exec.pull_word()?;
    exec.regs.pc = return_address.wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register, then PC. Unlike RTS, the pulled PC is used
/// as-is.
pub(crate) fn execute_rti<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    let status = exec.pull()?;
    exec.regs.flags = Flags::from_byte(status);
    exec.regs.pc = exec.pull_word()?;
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK forces a software interrupt by:
/// 1. Pushing PC+2 (BRK is 1 byte, the extra byte is a padding signature)
/// 2. Pushing the processor status with B and bit 5 set
/// 3. Setting the I (interrupt disable) flag
/// 4. Loading PC from the IRQ vector at $FFFE/$FFFF
///
/// When the configuration sets `halt_on_brk`, BRK instead halts the processor
/// like a JAM opcode.
pub(crate) fn execute_brk<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    if exec.config().halt_on_brk {
        return Err(ExecutionError::Jammed {
            opcode: exec.instr.opcode(),
            address: exec.instr.address(),
        });
    }

    let return_address = exec.instr.address().wrapping_add(2);
    exec.push_word(return_address)?;

    let status = exec.regs.flags.to_byte() | 0b0011_0000;
    exec.push(status)?;

    exec.regs.flags.i = true;

    let lo = exec.read(IRQ_VECTOR)?;
    let hi = exec.read(IRQ_VECTOR.wrapping_add(1))?;
    exec.regs.pc = u16::from_le_bytes([lo, hi]);
    Ok(())
}

/// Executes the NOP (No Operation) instruction.
///
/// Undocumented NOPs with memory operands perform their read, so that the
/// operand is resolved (and bounds-checked) exactly like a load would.
pub(crate) fn execute_nop<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    if exec.instr.addressing_mode() != AddressingMode::Implicit {
        exec.operand_value()?;
    }
    Ok(())
}
