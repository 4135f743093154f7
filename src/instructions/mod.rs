//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all supported instructions,
//! organized by category. Each instruction is a standalone function taking the
//! execution context [`Exec`].
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//! - **illegal**: Undocumented opcodes (SLO, RLA, SRE, RRA, SAX, LAX, DCP, ISC,
//!   ANC, ALR, ARR, SBX, JAM)
//!
//! ## Atomicity
//!
//! Instructions never touch `State` directly. They work on a copy of the
//! register file held in `Exec` and queue memory writes; `execute` commits
//! both only once the instruction has completed without error.

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod illegal;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::config::CoreConfig;
use crate::decoder::Instruction;
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;
use crate::state::{Registers, State, STACK_BASE};
use crate::{AddressingMode, ExecutionError};

/// Upper bound on memory writes by one instruction (BRK pushes three bytes).
const MAX_WRITES: usize = 3;

/// Execution context for one instruction.
pub(crate) struct Exec<'a, M: MemoryBus> {
    state: &'a State<M>,
    pub(crate) instr: &'a Instruction,
    pub(crate) regs: Registers,
    writes: [(u16, u8); MAX_WRITES],
    write_count: usize,
}

impl<'a, M: MemoryBus> Exec<'a, M> {
    fn new(state: &'a State<M>, instr: &'a Instruction) -> Self {
        let mut regs = state.registers();
        regs.pc = instr.next_address();

        Self {
            state,
            instr,
            regs,
            writes: [(0, 0); MAX_WRITES],
            write_count: 0,
        }
    }

    fn finish(self) -> (Registers, [(u16, u8); MAX_WRITES], usize) {
        (self.regs, self.writes, self.write_count)
    }

    pub(crate) fn config(&self) -> &CoreConfig {
        self.state.config()
    }

    fn invalid_mode(&self) -> ExecutionError {
        ExecutionError::InvalidAddressingMode {
            opcode: self.instr.opcode(),
            mode: self.instr.addressing_mode(),
        }
    }

    // ========== Memory Access ==========

    /// Reads through the write queue, so an instruction sees its own writes.
    pub(crate) fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        let addr = self.state.map(addr)?;
        let queued = self.writes[..self.write_count]
            .iter()
            .rev()
            .find(|&&(queued_addr, _)| queued_addr == addr);

        match queued {
            Some(&(_, value)) => Ok(value),
            None => Ok(self.state.memory().read(addr)),
        }
    }

    /// Queues a write. The address is mapped (and bounds-checked) now so that
    /// commit cannot fail.
    pub(crate) fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        let addr = self.state.map(addr)?;
        self.writes[self.write_count] = (addr, value);
        self.write_count += 1;
        Ok(())
    }

    /// Reads a little-endian word from zero page, wrapping within page 0.
    fn read_zero_page_word(&self, ptr: u8) -> Result<u16, ExecutionError> {
        let lo = self.read(ptr as u16)?;
        let hi = self.read(ptr.wrapping_add(1) as u16)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    // ========== Addressing ==========

    /// Computes the effective address for the instruction's addressing mode.
    pub(crate) fn effective_address(&self) -> Result<u16, ExecutionError> {
        let instr = self.instr;
        let regs = &self.regs;

        match instr.addressing_mode() {
            AddressingMode::ZeroPage => Ok(instr.operand_u8() as u16),
            AddressingMode::ZeroPageX => Ok(instr.operand_u8().wrapping_add(regs.x) as u16),
            AddressingMode::ZeroPageY => Ok(instr.operand_u8().wrapping_add(regs.y) as u16),
            AddressingMode::Absolute => Ok(instr.operand_u16()),
            AddressingMode::AbsoluteX => Ok(instr.operand_u16().wrapping_add(regs.x as u16)),
            AddressingMode::AbsoluteY => Ok(instr.operand_u16().wrapping_add(regs.y as u16)),
            AddressingMode::Indirect => {
                // NMOS bug: the high byte is fetched from the same page when
                // the pointer sits at $xxFF.
                let ptr = instr.operand_u16();
                let lo = self.read(ptr)?;
                let hi = self.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF))?;
                Ok(u16::from_le_bytes([lo, hi]))
            }
            AddressingMode::IndirectX => {
                self.read_zero_page_word(instr.operand_u8().wrapping_add(regs.x))
            }
            AddressingMode::IndirectY => Ok(self
                .read_zero_page_word(instr.operand_u8())?
                .wrapping_add(regs.y as u16)),
            AddressingMode::Relative => Ok(self.branch_target()),
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Immediate => Err(self.invalid_mode()),
        }
    }

    /// Resolves the operand value: the literal for Immediate, A for
    /// Accumulator, otherwise the byte at the effective address.
    pub(crate) fn operand_value(&self) -> Result<u8, ExecutionError> {
        match self.instr.addressing_mode() {
            AddressingMode::Immediate => Ok(self.instr.operand_u8()),
            AddressingMode::Accumulator => Ok(self.regs.a),
            mode if mode.has_effective_address() => self.read(self.effective_address()?),
            _ => Err(self.invalid_mode()),
        }
    }

    /// Next-instruction address plus the signed relative offset.
    pub(crate) fn branch_target(&self) -> u16 {
        let offset = self.instr.operand_u8() as i8;
        self.instr
            .next_address()
            .wrapping_add_signed(offset as i16)
    }

    /// Read-modify-write on A (Accumulator mode) or the effective address.
    ///
    /// `op` gets the register copy so it can update flags, and returns the
    /// value to store back.
    pub(crate) fn modify(
        &mut self,
        op: impl FnOnce(&mut Registers, u8) -> u8,
    ) -> Result<u8, ExecutionError> {
        if self.instr.addressing_mode() == AddressingMode::Accumulator {
            let a = self.regs.a;
            let result = op(&mut self.regs, a);
            self.regs.a = result;
            return Ok(result);
        }

        let addr = self.effective_address()?;
        let value = self.read(addr)?;
        let result = op(&mut self.regs, value);
        self.write(addr, result)?;
        Ok(result)
    }

    // ========== Stack ==========

    pub(crate) fn push(&mut self, value: u8) -> Result<(), ExecutionError> {
        self.write(STACK_BASE | self.regs.sp as u16, value)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        Ok(())
    }

    pub(crate) fn pull(&mut self) -> Result<u8, ExecutionError> {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.read(STACK_BASE | self.regs.sp as u16)
    }

    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), ExecutionError> {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi)?;
        self.push(lo)
    }

    pub(crate) fn pull_word(&mut self) -> Result<u16, ExecutionError> {
        let lo = self.pull()?;
        let hi = self.pull()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}

/// Executes a decoded instruction against `state`.
///
/// PC is set to the instruction's successor unless the instruction transfers
/// control. Either the whole instruction takes effect or, on error, nothing
/// does.
///
/// # Errors
///
/// - `OutOfBoundsAddress` under `AddressPolicy::Strict`
/// - `Jammed` for JAM opcodes, and for BRK when `halt_on_brk` is configured
///
/// # Examples
///
/// ```
/// use core6502::{decode_one, execute, Flag, State};
///
/// let mut state = State::default();
/// let (instr, _) = decode_one(&[0xA9, 0x80], 0).unwrap();
///
/// execute(&mut state, &instr).unwrap();
///
/// assert_eq!(state.a(), 0x80);
/// assert!(state.get_flag(Flag::Negative));
/// assert!(!state.get_flag(Flag::Zero));
/// assert_eq!(state.pc(), 0x0002);
/// ```
pub fn execute<M: MemoryBus>(
    state: &mut State<M>,
    instruction: &Instruction,
) -> Result<(), ExecutionError> {
    let (registers, writes, count) = {
        let mut exec = Exec::new(state, instruction);
        dispatch(&mut exec)?;
        exec.finish()
    };

    log::trace!(
        "{:04X}  {:02X}  {} {:?}",
        instruction.address(),
        instruction.opcode(),
        instruction.mnemonic(),
        instruction.addressing_mode()
    );

    state.commit(registers, &writes[..count]);
    Ok(())
}

fn dispatch<M: MemoryBus>(exec: &mut Exec<'_, M>) -> Result<(), ExecutionError> {
    use Mnemonic::*;

    match exec.instr.mnemonic() {
        Lda => load_store::execute_lda(exec),
        Ldx => load_store::execute_ldx(exec),
        Ldy => load_store::execute_ldy(exec),
        Sta => load_store::execute_sta(exec),
        Stx => load_store::execute_stx(exec),
        Sty => load_store::execute_sty(exec),

        Adc => alu::execute_adc(exec),
        Sbc => alu::execute_sbc(exec),
        And => alu::execute_and(exec),
        Ora => alu::execute_ora(exec),
        Eor => alu::execute_eor(exec),
        Bit => alu::execute_bit(exec),
        Cmp => alu::execute_cmp(exec),
        Cpx => alu::execute_cpx(exec),
        Cpy => alu::execute_cpy(exec),

        Asl => shifts::execute_asl(exec),
        Lsr => shifts::execute_lsr(exec),
        Rol => shifts::execute_rol(exec),
        Ror => shifts::execute_ror(exec),

        Inc => inc_dec::execute_inc(exec),
        Dec => inc_dec::execute_dec(exec),
        Inx => inc_dec::execute_inx(exec),
        Iny => inc_dec::execute_iny(exec),
        Dex => inc_dec::execute_dex(exec),
        Dey => inc_dec::execute_dey(exec),

        Bpl => branches::execute_bpl(exec),
        Bmi => branches::execute_bmi(exec),
        Bvc => branches::execute_bvc(exec),
        Bvs => branches::execute_bvs(exec),
        Bcc => branches::execute_bcc(exec),
        Bcs => branches::execute_bcs(exec),
        Bne => branches::execute_bne(exec),
        Beq => branches::execute_beq(exec),

        Jmp => control::execute_jmp(exec),
        Jsr => control::execute_jsr(exec),
        Rts => control::execute_rts(exec),
        Rti => control::execute_rti(exec),
        Brk => control::execute_brk(exec),
        Nop => control::execute_nop(exec),

        Pha => stack::execute_pha(exec),
        Php => stack::execute_php(exec),
        Pla => stack::execute_pla(exec),
        Plp => stack::execute_plp(exec),

        Clc => flags::execute_clc(exec),
        Sec => flags::execute_sec(exec),
        Cli => flags::execute_cli(exec),
        Sei => flags::execute_sei(exec),
        Cld => flags::execute_cld(exec),
        Sed => flags::execute_sed(exec),
        Clv => flags::execute_clv(exec),

        Tax => transfer::execute_tax(exec),
        Tay => transfer::execute_tay(exec),
        Txa => transfer::execute_txa(exec),
        Tya => transfer::execute_tya(exec),
        Tsx => transfer::execute_tsx(exec),
        Txs => transfer::execute_txs(exec),

        Slo => illegal::execute_slo(exec),
        Rla => illegal::execute_rla(exec),
        Sre => illegal::execute_sre(exec),
        Rra => illegal::execute_rra(exec),
        Sax => illegal::execute_sax(exec),
        Lax => illegal::execute_lax(exec),
        Dcp => illegal::execute_dcp(exec),
        Isc => illegal::execute_isc(exec),
        Anc => illegal::execute_anc(exec),
        Alr => illegal::execute_alr(exec),
        Arr => illegal::execute_arr(exec),
        Sbx => illegal::execute_sbx(exec),
        Jam => illegal::execute_jam(exec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressPolicy, CoreConfig};
    use crate::decoder::decode_one;
    use crate::state::Flag;

    fn run(state: &mut State, bytes: &[u8]) -> Result<(), ExecutionError> {
        let (instr, _) = decode_one(bytes, 0).unwrap();
        execute(state, &instr)
    }

    #[test]
    fn test_indirect_x_wraps_in_zero_page() {
        let mut state = State::default();
        state.set_x(0x01);
        // Pointer at $FF/$00
        state.write(0x00FF, 0x34).unwrap();
        state.write(0x0000, 0x02).unwrap();
        state.write(0x0234, 0x99).unwrap();

        // LDA ($FE,X)
        run(&mut state, &[0xA1, 0xFE]).unwrap();
        assert_eq!(state.a(), 0x99);
    }

    #[test]
    fn test_indirect_y_pointer_wraps_in_zero_page() {
        let mut state = State::default();
        state.set_y(0x10);
        state.write(0x00FF, 0x00).unwrap();
        state.write(0x0000, 0x03).unwrap();
        state.write(0x0310, 0x5A).unwrap();

        // LDA ($FF),Y
        run(&mut state, &[0xB1, 0xFF]).unwrap();
        assert_eq!(state.a(), 0x5A);
    }

    #[test]
    fn test_jmp_indirect_page_wrap_bug() {
        let mut state = State::new(CoreConfig::default().with_memory_size(0x10000)).unwrap();
        state.write(0x02FF, 0x34).unwrap();
        state.write(0x0200, 0x12).unwrap();
        state.write(0x0300, 0x56).unwrap();

        // JMP ($02FF)
        run(&mut state, &[0x6C, 0xFF, 0x02]).unwrap();
        assert_eq!(state.pc(), 0x1234);
    }

    #[test]
    fn test_strict_out_of_bounds_leaves_state_untouched() {
        let config = CoreConfig::default().with_address_policy(AddressPolicy::Strict);
        let mut state = State::new(config).unwrap();
        state.set_a(0x42);
        state.set_pc(0x0000);
        let before = state.registers();

        // STA $1000 with only 2 KiB of memory
        let err = run(&mut state, &[0x8D, 0x00, 0x10]).unwrap_err();
        assert_eq!(err, ExecutionError::OutOfBoundsAddress(0x1000));
        assert_eq!(state.registers(), before);
    }

    #[test]
    fn test_strict_brk_vector_out_of_bounds_pushes_nothing() {
        let config = CoreConfig::default().with_address_policy(AddressPolicy::Strict);
        let mut state = State::new(config).unwrap();
        let before = state.registers();

        let err = run(&mut state, &[0x00]).unwrap_err();
        assert_eq!(err, ExecutionError::OutOfBoundsAddress(0xFFFE));
        assert_eq!(state.registers(), before);
        assert_eq!(state.read(0x01FD).unwrap(), 0x00);
        assert_eq!(state.read(0x01FC).unwrap(), 0x00);
        assert!(state.get_flag(Flag::InterruptDisable));
    }
}
