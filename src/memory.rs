//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples architectural state
//! from a specific memory implementation, and `FlatMemory`, an owned byte buffer
//! whose size is chosen at construction.
//!
//! ## Design Principles
//!
//! - Reads and writes on the bus never panic
//! - The bus reports its size; address policy (wrap or strict) is applied by
//!   `State` before the bus is touched
//! - Simple signatures for WASM compatibility

/// Memory bus trait for reading and writing bytes.
///
/// The `State` accesses all memory through this abstraction. Addresses handed
/// to the bus have already been mapped into `0..size()` by the state's address
/// policy, but implementations must still tolerate any `u16`.
///
/// # Examples
///
/// ```
/// use core6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::with_size(2048);
///
/// mem.write(0x0123, 0x42);
/// assert_eq!(mem.read(0x0123), 0x42);
/// assert_eq!(mem.size(), 2048);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use core6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x0800],
///     rom: [u8; 0x0800],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         let addr = addr as usize % 0x1000;
///         if addr < 0x0800 {
///             self.ram[addr]
///         } else {
///             self.rom[addr - 0x0800]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         let addr = addr as usize % 0x1000;
///         if addr < 0x0800 {
///             self.ram[addr] = value;
///         }
///         // Writes to ROM are silently ignored
///     }
///
///     fn size(&self) -> usize {
///         0x1000
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified address.
    ///
    /// This method must never panic. Read-only regions may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Number of addressable bytes (1..=65536).
    ///
    /// Defaults to the full 16-bit address space.
    fn size(&self) -> usize {
        0x10000
    }
}

/// Flat RAM of configurable size.
///
/// All addresses `0..size` are writable RAM initialized to 0x00. Accesses past
/// the end wrap modulo the size so the bus itself can never panic.
///
/// # Examples
///
/// ```
/// use core6502::{FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::with_size(2048);
/// memory.load(0x0200, &[0xA9, 0x01]);
///
/// assert_eq!(memory.read(0x0200), 0xA9);
/// assert_eq!(memory.read(0x0A00), 0xA9); // 0x0A00 % 2048 == 0x0200
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMemory {
    data: Box<[u8]>,
}

impl FlatMemory {
    /// Creates a full 64 KiB memory with all bytes zeroed.
    pub fn new() -> Self {
        Self::with_size(0x10000)
    }

    /// Creates a zeroed memory of `size` bytes.
    ///
    /// A size of 0 is bumped to 1 so that every access has a cell to land on;
    /// `CoreConfig::validate` rejects it before it gets here.
    pub fn with_size(size: usize) -> Self {
        let size = size.clamp(1, 0x10000);
        Self {
            data: vec![0; size].into_boxed_slice(),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping at the end.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.write(start.wrapping_add(i as u16), byte);
        }
    }

    /// Borrow the raw contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, addr: u16) -> usize {
        addr as usize % self.data.len()
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[self.index(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        let index = self.index(addr);
        self.data[index] = value;
    }

    fn size(&self) -> usize {
        self.data.len()
    }
}
