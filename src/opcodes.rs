//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for decoding.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **97 undocumented opcodes** with well-defined behavior (SLO, RLA, SRE,
//!   RRA, SAX, LAX, DCP, ISC, ANC, ALR, ARR, SBX, USBC, multi-byte NOPs, JAM)
//! - **8 holes** for the unstable opcodes (XAA, LXA, SHA, SHX, SHY, TAS, LAS),
//!   which decode as unknown
//!
//! Each entry pairs a [`Mnemonic`] with an [`AddressingMode`]; together they are
//! the composite key that selects instruction semantics.

use std::fmt;

use crate::addressing::AddressingMode;
use AddressingMode::{
    Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Accumulator as Acc, Immediate as Imm,
    Implicit as Imp, Indirect as Ind, IndirectX as Izx, IndirectY as Izy, Relative as Rel,
    ZeroPage as Zp, ZeroPageX as Zpx, ZeroPageY as Zpy,
};
use Mnemonic::*;

/// Operation identity, independent of addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Load / store
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    // Arithmetic and logic
    Adc,
    Sbc,
    And,
    Ora,
    Eor,
    Bit,
    Cmp,
    Cpx,
    Cpy,
    // Shifts and rotates
    Asl,
    Lsr,
    Rol,
    Ror,
    // Increment / decrement
    Inc,
    Dec,
    Inx,
    Iny,
    Dex,
    Dey,
    // Branches
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    // Control flow
    Jmp,
    Jsr,
    Rts,
    Rti,
    Brk,
    Nop,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Flags
    Clc,
    Sec,
    Cli,
    Sei,
    Cld,
    Sed,
    Clv,
    // Transfers
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    // Undocumented
    Slo,
    Rla,
    Sre,
    Rra,
    Sax,
    Lax,
    Dcp,
    Isc,
    Anc,
    Alr,
    Arr,
    Sbx,
    Jam,
}

impl Mnemonic {
    /// Upper-case assembler name, e.g. `"LDA"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Adc => "ADC",
            Sbc => "SBC",
            And => "AND",
            Ora => "ORA",
            Eor => "EOR",
            Bit => "BIT",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Asl => "ASL",
            Lsr => "LSR",
            Rol => "ROL",
            Ror => "ROR",
            Inc => "INC",
            Dec => "DEC",
            Inx => "INX",
            Iny => "INY",
            Dex => "DEX",
            Dey => "DEY",
            Bpl => "BPL",
            Bmi => "BMI",
            Bvc => "BVC",
            Bvs => "BVS",
            Bcc => "BCC",
            Bcs => "BCS",
            Bne => "BNE",
            Beq => "BEQ",
            Jmp => "JMP",
            Jsr => "JSR",
            Rts => "RTS",
            Rti => "RTI",
            Brk => "BRK",
            Nop => "NOP",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Clc => "CLC",
            Sec => "SEC",
            Cli => "CLI",
            Sei => "SEI",
            Cld => "CLD",
            Sed => "SED",
            Clv => "CLV",
            Tax => "TAX",
            Tay => "TAY",
            Txa => "TXA",
            Tya => "TYA",
            Tsx => "TSX",
            Txs => "TXS",
            Slo => "SLO",
            Rla => "RLA",
            Sre => "SRE",
            Rra => "RRA",
            Sax => "SAX",
            Lax => "LAX",
            Dcp => "DCP",
            Isc => "ISC",
            Anc => "ANC",
            Alr => "ALR",
            Arr => "ARR",
            Sbx => "SBX",
            Jam => "JAM",
        }
    }

    /// True for the eight conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(self, Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq)
    }

    /// True for instructions that may set PC to something other than the next instruction.
    pub const fn is_control_flow(self) -> bool {
        self.is_branch() || matches!(self, Jmp | Jsr | Rts | Rti | Brk | Jam)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use core6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert!(!lda_imm.undocumented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Operation identity.
    pub mnemonic: Mnemonic,

    /// How the operand bytes are interpreted.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands, 1-3).
    pub size_bytes: u8,

    /// Not part of the official MOS instruction set.
    pub undocumented: bool,
}

const fn op(mnemonic: Mnemonic, addressing_mode: AddressingMode) -> Option<OpcodeMetadata> {
    Some(OpcodeMetadata {
        mnemonic,
        addressing_mode,
        size_bytes: 1 + addressing_mode.operand_len(),
        undocumented: false,
    })
}

const fn ill(mnemonic: Mnemonic, addressing_mode: AddressingMode) -> Option<OpcodeMetadata> {
    Some(OpcodeMetadata {
        mnemonic,
        addressing_mode,
        size_bytes: 1 + addressing_mode.operand_len(),
        undocumented: true,
    })
}

/// Looks up the table entry for `opcode`; `None` for the unstable holes.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// `None` marks opcodes whose hardware behavior is unstable; decoding them
/// yields `DecodeError::UnknownOpcode`.
#[rustfmt::skip]
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = [
    // 0x00
    op(Brk, Imp), op(Ora, Izx), ill(Jam, Imp), ill(Slo, Izx),
    ill(Nop, Zp), op(Ora, Zp), op(Asl, Zp), ill(Slo, Zp),
    op(Php, Imp), op(Ora, Imm), op(Asl, Acc), ill(Anc, Imm),
    ill(Nop, Abs), op(Ora, Abs), op(Asl, Abs), ill(Slo, Abs),
    // 0x10
    op(Bpl, Rel), op(Ora, Izy), ill(Jam, Imp), ill(Slo, Izy),
    ill(Nop, Zpx), op(Ora, Zpx), op(Asl, Zpx), ill(Slo, Zpx),
    op(Clc, Imp), op(Ora, Aby), ill(Nop, Imp), ill(Slo, Aby),
    ill(Nop, Abx), op(Ora, Abx), op(Asl, Abx), ill(Slo, Abx),
    // 0x20
    op(Jsr, Abs), op(And, Izx), ill(Jam, Imp), ill(Rla, Izx),
    op(Bit, Zp), op(And, Zp), op(Rol, Zp), ill(Rla, Zp),
    op(Plp, Imp), op(And, Imm), op(Rol, Acc), ill(Anc, Imm),
    op(Bit, Abs), op(And, Abs), op(Rol, Abs), ill(Rla, Abs),
    // 0x30
    op(Bmi, Rel), op(And, Izy), ill(Jam, Imp), ill(Rla, Izy),
    ill(Nop, Zpx), op(And, Zpx), op(Rol, Zpx), ill(Rla, Zpx),
    op(Sec, Imp), op(And, Aby), ill(Nop, Imp), ill(Rla, Aby),
    ill(Nop, Abx), op(And, Abx), op(Rol, Abx), ill(Rla, Abx),
    // 0x40
    op(Rti, Imp), op(Eor, Izx), ill(Jam, Imp), ill(Sre, Izx),
    ill(Nop, Zp), op(Eor, Zp), op(Lsr, Zp), ill(Sre, Zp),
    op(Pha, Imp), op(Eor, Imm), op(Lsr, Acc), ill(Alr, Imm),
    op(Jmp, Abs), op(Eor, Abs), op(Lsr, Abs), ill(Sre, Abs),
    // 0x50
    op(Bvc, Rel), op(Eor, Izy), ill(Jam, Imp), ill(Sre, Izy),
    ill(Nop, Zpx), op(Eor, Zpx), op(Lsr, Zpx), ill(Sre, Zpx),
    op(Cli, Imp), op(Eor, Aby), ill(Nop, Imp), ill(Sre, Aby),
    ill(Nop, Abx), op(Eor, Abx), op(Lsr, Abx), ill(Sre, Abx),
    // 0x60
    op(Rts, Imp), op(Adc, Izx), ill(Jam, Imp), ill(Rra, Izx),
    ill(Nop, Zp), op(Adc, Zp), op(Ror, Zp), ill(Rra, Zp),
    op(Pla, Imp), op(Adc, Imm), op(Ror, Acc), ill(Arr, Imm),
    op(Jmp, Ind), op(Adc, Abs), op(Ror, Abs), ill(Rra, Abs),
    // 0x70
    op(Bvs, Rel), op(Adc, Izy), ill(Jam, Imp), ill(Rra, Izy),
    ill(Nop, Zpx), op(Adc, Zpx), op(Ror, Zpx), ill(Rra, Zpx),
    op(Sei, Imp), op(Adc, Aby), ill(Nop, Imp), ill(Rra, Aby),
    ill(Nop, Abx), op(Adc, Abx), op(Ror, Abx), ill(Rra, Abx),
    // 0x80
    ill(Nop, Imm), op(Sta, Izx), ill(Nop, Imm), ill(Sax, Izx),
    op(Sty, Zp), op(Sta, Zp), op(Stx, Zp), ill(Sax, Zp),
    op(Dey, Imp), ill(Nop, Imm), op(Txa, Imp), None,
    op(Sty, Abs), op(Sta, Abs), op(Stx, Abs), ill(Sax, Abs),
    // 0x90
    op(Bcc, Rel), op(Sta, Izy), ill(Jam, Imp), None,
    op(Sty, Zpx), op(Sta, Zpx), op(Stx, Zpy), ill(Sax, Zpy),
    op(Tya, Imp), op(Sta, Aby), op(Txs, Imp), None,
    None, op(Sta, Abx), None, None,
    // 0xA0
    op(Ldy, Imm), op(Lda, Izx), op(Ldx, Imm), ill(Lax, Izx),
    op(Ldy, Zp), op(Lda, Zp), op(Ldx, Zp), ill(Lax, Zp),
    op(Tay, Imp), op(Lda, Imm), op(Tax, Imp), None,
    op(Ldy, Abs), op(Lda, Abs), op(Ldx, Abs), ill(Lax, Abs),
    // 0xB0
    op(Bcs, Rel), op(Lda, Izy), ill(Jam, Imp), ill(Lax, Izy),
    op(Ldy, Zpx), op(Lda, Zpx), op(Ldx, Zpy), ill(Lax, Zpy),
    op(Clv, Imp), op(Lda, Aby), op(Tsx, Imp), None,
    op(Ldy, Abx), op(Lda, Abx), op(Ldx, Aby), ill(Lax, Aby),
    // 0xC0
    op(Cpy, Imm), op(Cmp, Izx), ill(Nop, Imm), ill(Dcp, Izx),
    op(Cpy, Zp), op(Cmp, Zp), op(Dec, Zp), ill(Dcp, Zp),
    op(Iny, Imp), op(Cmp, Imm), op(Dex, Imp), ill(Sbx, Imm),
    op(Cpy, Abs), op(Cmp, Abs), op(Dec, Abs), ill(Dcp, Abs),
    // 0xD0
    op(Bne, Rel), op(Cmp, Izy), ill(Jam, Imp), ill(Dcp, Izy),
    ill(Nop, Zpx), op(Cmp, Zpx), op(Dec, Zpx), ill(Dcp, Zpx),
    op(Cld, Imp), op(Cmp, Aby), ill(Nop, Imp), ill(Dcp, Aby),
    ill(Nop, Abx), op(Cmp, Abx), op(Dec, Abx), ill(Dcp, Abx),
    // 0xE0
    op(Cpx, Imm), op(Sbc, Izx), ill(Nop, Imm), ill(Isc, Izx),
    op(Cpx, Zp), op(Sbc, Zp), op(Inc, Zp), ill(Isc, Zp),
    op(Inx, Imp), op(Sbc, Imm), op(Nop, Imp), ill(Sbc, Imm),
    op(Cpx, Abs), op(Sbc, Abs), op(Inc, Abs), ill(Isc, Abs),
    // 0xF0
    op(Beq, Rel), op(Sbc, Izy), ill(Jam, Imp), ill(Isc, Izy),
    ill(Nop, Zpx), op(Sbc, Zpx), op(Inc, Zpx), ill(Isc, Zpx),
    op(Sed, Imp), op(Sbc, Aby), ill(Nop, Imp), ill(Isc, Aby),
    ill(Nop, Abx), op(Sbc, Abx), op(Inc, Abx), ill(Isc, Abx),
];
