//! # Instruction Decoder
//!
//! Turns the byte at a cursor position into an `Instruction` using the opcode
//! table. Decoding reads only the byte stream; it never touches state.

use crate::addressing::AddressingMode;
use crate::opcodes::{self, Mnemonic};
use crate::DecodeError;

/// Upper bound on decodable stream offsets.
///
/// The cursor is derived from PC (`PC - origin`), so it lives in 16 bits; an
/// instruction must end at or before this offset for its successor to stay
/// representable.
pub const MAX_STREAM_LEN: usize = 0xFFFF;

/// A single decoded instruction.
///
/// Ephemeral: built by one decode step and consumed by `execute`. Only the
/// decoder constructs it, so mnemonic, mode, size and operand always agree
/// with the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    address: u16,
    opcode: u8,
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    size_bytes: u8,
    undocumented: bool,
    operand: [u8; 2],
}

impl Instruction {
    /// PC value of the opcode byte.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// The opcode byte value (0x00-0xFF).
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn addressing_mode(&self) -> AddressingMode {
        self.addressing_mode
    }

    /// Total size in bytes (1-3 bytes: opcode + operands).
    pub fn size_bytes(&self) -> u8 {
        self.size_bytes
    }

    /// Not part of the official instruction set.
    pub fn is_undocumented(&self) -> bool {
        self.undocumented
    }

    /// Operand bytes (0-2, in stream order).
    pub fn operand_bytes(&self) -> &[u8] {
        &self.operand[..(self.size_bytes - 1) as usize]
    }

    /// First operand byte, or 0 for implied instructions.
    pub fn operand_u8(&self) -> u8 {
        self.operand[0]
    }

    /// Little-endian 16-bit operand, for two-byte modes.
    pub fn operand_u16(&self) -> u16 {
        u16::from_le_bytes(self.operand)
    }

    /// Address of the instruction that follows this one.
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.size_bytes as u16)
    }
}

/// Decodes the instruction at `offset`, assigning it address `offset`.
///
/// Returns the instruction and the offset just past it.
///
/// # Errors
///
/// - `EndOfStream` if `offset >= bytes.len()`
/// - `UnknownOpcode` if the byte has no table entry
/// - `TruncatedOperand` if the stream ends inside the operand
///
/// # Examples
///
/// ```
/// use core6502::{decode_one, AddressingMode, Mnemonic};
///
/// let (instr, next) = decode_one(&[0xA9, 0x42], 0).unwrap();
/// assert_eq!(instr.mnemonic(), Mnemonic::Lda);
/// assert_eq!(instr.addressing_mode(), AddressingMode::Immediate);
/// assert_eq!(instr.operand_bytes(), &[0x42]);
/// assert_eq!(next, 2);
/// ```
pub fn decode_one(bytes: &[u8], offset: usize) -> Result<(Instruction, usize), DecodeError> {
    decode_at(bytes, offset, 0)
}

/// Like `decode_one`, but the byte at offset 0 lives at address `origin`.
///
/// Only offsets below [`MAX_STREAM_LEN`] are decodable; an instruction
/// that would end past it is rejected with `OutsideAddressWindow`.
pub fn decode_at(
    bytes: &[u8],
    offset: usize,
    origin: u16,
) -> Result<(Instruction, usize), DecodeError> {
    let opcode = *bytes
        .get(offset)
        .ok_or(DecodeError::EndOfStream { offset })?;
    if offset >= MAX_STREAM_LEN {
        return Err(DecodeError::OutsideAddressWindow { offset });
    }

    let metadata =
        opcodes::lookup(opcode).ok_or(DecodeError::UnknownOpcode { opcode, offset })?;

    let size = metadata.size_bytes as usize;
    if offset + size > MAX_STREAM_LEN {
        return Err(DecodeError::OutsideAddressWindow { offset });
    }
    let operand_slice = bytes
        .get(offset + 1..offset + size)
        .ok_or(DecodeError::TruncatedOperand { offset })?;

    let mut operand = [0u8; 2];
    operand[..operand_slice.len()].copy_from_slice(operand_slice);

    let instruction = Instruction {
        address: origin.wrapping_add(offset as u16),
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        size_bytes: metadata.size_bytes,
        undocumented: metadata.undocumented,
        operand,
    };

    Ok((instruction, offset + size))
}
