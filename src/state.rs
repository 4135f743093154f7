//! # Architectural State
//!
//! The register file, the status flags and the memory bus of one emulated
//! session. This module is pure storage with bounds discipline: no
//! instruction semantics live here.
//!
//! ## Registers
//!
//! - **Accumulator** (A), index registers (X, Y): 8-bit unsigned
//! - **Program counter** (PC): 16-bit address of the next instruction
//! - **Stack pointer** (SP): 8-bit offset into the stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)

use crate::config::{AddressPolicy, CoreConfig};
use crate::memory::{FlatMemory, MemoryBus};
use crate::{ConfigError, ExecutionError};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Names of the status flags, for `get_flag` / `set_flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Carry,
    Zero,
    InterruptDisable,
    Decimal,
    Break,
    Overflow,
    Negative,
}

impl Flag {
    /// Bit position of this flag in the packed status byte (NV-BDIZC).
    pub const fn mask(self) -> u8 {
        match self {
            Flag::Carry => 0b0000_0001,
            Flag::Zero => 0b0000_0010,
            Flag::InterruptDisable => 0b0000_0100,
            Flag::Decimal => 0b0000_1000,
            Flag::Break => 0b0001_0000,
            Flag::Overflow => 0b0100_0000,
            Flag::Negative => 0b1000_0000,
        }
    }
}

/// Processor status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    /// Carry flag (set on unsigned overflow, cleared on borrow)
    pub c: bool,

    /// Zero flag (set if result is zero)
    pub z: bool,

    /// Interrupt disable flag
    pub i: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub d: bool,

    /// Break flag
    pub b: bool,

    /// Overflow flag (set on signed overflow)
    pub v: bool,

    /// Negative flag (bit 7 of result)
    pub n: bool,
}

impl Flags {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Carry => self.c,
            Flag::Zero => self.z,
            Flag::InterruptDisable => self.i,
            Flag::Decimal => self.d,
            Flag::Break => self.b,
            Flag::Overflow => self.v,
            Flag::Negative => self.n,
        }
    }

    pub fn set(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Carry => self.c = value,
            Flag::Zero => self.z = value,
            Flag::InterruptDisable => self.i = value,
            Flag::Decimal => self.d = value,
            Flag::Break => self.b = value,
            Flag::Overflow => self.v = value,
            Flag::Negative => self.n = value,
        }
    }

    /// Sets Z and N from `value`.
    pub fn set_zn(&mut self, value: u8) {
        self.z = value == 0;
        self.n = value & 0x80 != 0;
    }

    /// Packs the flags into a status byte (NV-BDIZC). Bit 5 is always 1.
    ///
    /// ```
    /// use core6502::Flags;
    ///
    /// let flags = Flags { c: true, n: true, ..Flags::default() };
    /// assert_eq!(flags.to_byte(), 0b1010_0001);
    /// ```
    pub fn to_byte(&self) -> u8 {
        [
            Flag::Carry,
            Flag::Zero,
            Flag::InterruptDisable,
            Flag::Decimal,
            Flag::Break,
            Flag::Overflow,
            Flag::Negative,
        ]
        .into_iter()
        .filter(|&flag| self.get(flag))
        .fold(0b0010_0000, |status, flag| status | flag.mask())
    }

    /// Unpacks a status byte. Bit 5 is ignored.
    pub fn from_byte(status: u8) -> Self {
        Self {
            c: status & Flag::Carry.mask() != 0,
            z: status & Flag::Zero.mask() != 0,
            i: status & Flag::InterruptDisable.mask() != 0,
            d: status & Flag::Decimal.mask() != 0,
            b: status & Flag::Break.mask() != 0,
            v: status & Flag::Overflow.mask() != 0,
            n: status & Flag::Negative.mask() != 0,
        }
    }
}

/// Snapshot of the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    /// Program counter (address of next instruction)
    pub pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub sp: u8,

    /// Accumulator
    pub a: u8,

    /// X index register
    pub x: u8,

    /// Y index register
    pub y: u8,

    pub flags: Flags,
}

impl Registers {
    /// Power-on register values for `config`.
    pub fn power_on(config: &CoreConfig) -> Self {
        Self {
            pc: config.origin,
            sp: config.initial_sp,
            a: 0x00,
            x: 0x00,
            y: 0x00,
            flags: Flags {
                i: true, // Interrupt disable set on reset
                ..Flags::default()
            },
        }
    }
}

/// Architectural state of one emulated session.
///
/// Generic over the memory implementation via the `MemoryBus` trait; defaults
/// to `FlatMemory`.
///
/// # Examples
///
/// ```
/// use core6502::{CoreConfig, Flag, State};
///
/// let mut state = State::new(CoreConfig::default()).unwrap();
///
/// assert_eq!(state.pc(), 0x0000);
/// assert_eq!(state.sp(), 0xFD);
/// assert!(state.get_flag(Flag::InterruptDisable));
///
/// state.write(0x0010, 0x42).unwrap();
/// assert_eq!(state.read(0x0010).unwrap(), 0x42);
///
/// // Default policy wraps: 2048 bytes of memory, 0x0810 lands on 0x0010
/// assert_eq!(state.read(0x0810).unwrap(), 0x42);
/// ```
#[derive(Debug, Clone)]
pub struct State<M: MemoryBus = FlatMemory> {
    pub(crate) registers: Registers,
    pub(crate) memory: M,
    config: CoreConfig,
}

impl State<FlatMemory> {
    /// Creates a state with a zeroed `FlatMemory` of `config.memory_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn new(config: CoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_memory(FlatMemory::with_size(config.memory_size), config))
    }
}

impl Default for State<FlatMemory> {
    fn default() -> Self {
        let config = CoreConfig::default();
        Self::with_memory(FlatMemory::with_size(config.memory_size), config)
    }
}

impl<M: MemoryBus> State<M> {
    /// Creates a state over an existing memory bus.
    ///
    /// The bus's own `size()` governs address mapping; `config.memory_size`
    /// only matters when `State::new` allocates the memory.
    pub fn with_memory(memory: M, config: CoreConfig) -> Self {
        Self {
            registers: Registers::power_on(&config),
            memory,
            config,
        }
    }

    /// Restores power-on register values. Memory is left untouched.
    pub fn reset(&mut self) {
        self.registers = Registers::power_on(&self.config);
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    // ========== Memory ==========

    /// Maps `addr` into the valid range according to the address policy.
    ///
    /// # Errors
    ///
    /// `OutOfBoundsAddress` under `AddressPolicy::Strict` when `addr` is at or
    /// past the memory size.
    pub fn map(&self, addr: u16) -> Result<u16, ExecutionError> {
        // A bus reporting size 0 is treated as a single cell
        let size = self.memory.size().max(1);
        match self.config.address_policy {
            AddressPolicy::Wrap => Ok((addr as usize % size) as u16),
            AddressPolicy::Strict if (addr as usize) < size => Ok(addr),
            AddressPolicy::Strict => Err(ExecutionError::OutOfBoundsAddress(addr)),
        }
    }

    pub fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        Ok(self.memory.read(self.map(addr)?))
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        let addr = self.map(addr)?;
        self.memory.write(addr, value);
        Ok(())
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Flags ==========

    pub fn get_flag(&self, flag: Flag) -> bool {
        self.registers.flags.get(flag)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.registers.flags.set(flag, value);
    }

    pub fn flags(&self) -> Flags {
        self.registers.flags
    }

    /// Returns the status register as a packed byte (NV-BDIZC, bit 5 set).
    pub fn status(&self) -> u8 {
        self.registers.flags.to_byte()
    }

    // ========== Registers ==========

    pub fn registers(&self) -> Registers {
        self.registers
    }

    pub fn set_registers(&mut self, registers: Registers) {
        self.registers = registers;
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.registers.pc = pc;
    }

    /// Returns the stack pointer.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.registers.sp
    }

    pub fn set_sp(&mut self, sp: u8) {
        self.registers.sp = sp;
    }

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.registers.a
    }

    pub fn set_a(&mut self, a: u8) {
        self.registers.a = a;
    }

    pub fn x(&self) -> u8 {
        self.registers.x
    }

    pub fn set_x(&mut self, x: u8) {
        self.registers.x = x;
    }

    pub fn y(&self) -> u8 {
        self.registers.y
    }

    pub fn set_y(&mut self, y: u8) {
        self.registers.y = y;
    }

    /// Applies the outcome of an instruction: registers first, then the queued
    /// writes. Write addresses were mapped when queued.
    pub(crate) fn commit(&mut self, registers: Registers, writes: &[(u16, u8)]) {
        self.registers = registers;
        for &(addr, value) in writes {
            self.memory.write(addr, value);
        }
    }
}
