//! Fuzz target for the decoder.
//!
//! This target feeds arbitrary byte sequences to the decoder to find edge
//! cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use core6502::{decode_at, DecodeError};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    origin: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    // Walk the stream linearly, stepping over undecodable bytes
    let mut offset = 0;
    while offset < input.bytes.len() {
        match decode_at(&input.bytes, offset, input.origin) {
            Ok((instr, next)) => {
                assert_eq!(instr.address(), input.origin.wrapping_add(offset as u16));
                assert!(instr.size_bytes() >= 1 && instr.size_bytes() <= 3);
                assert_eq!(instr.operand_bytes().len(), instr.size_bytes() as usize - 1);
                assert_eq!(next, offset + instr.size_bytes() as usize);
                offset = next;
            }
            Err(DecodeError::UnknownOpcode { offset: at, .. }) => {
                assert_eq!(at, offset);
                offset += 1;
            }
            Err(DecodeError::TruncatedOperand { offset: at }) => {
                assert_eq!(at, offset);
                assert!(offset + 3 > input.bytes.len());
                break;
            }
            Err(DecodeError::OutsideAddressWindow { offset: at }) => {
                assert_eq!(at, offset);
                assert!(offset + 3 > core6502::MAX_STREAM_LEN);
                break;
            }
            Err(DecodeError::EndOfStream { .. }) => unreachable!("offset is in range"),
        }
    }
});
