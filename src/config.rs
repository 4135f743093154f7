//! # Core Configuration
//!
//! `CoreConfig` collects every knob the engine and session read. It is a plain
//! `Copy` value: build it once, hand it to `State::new` or `Cpu::new`.
//!
//! ```
//! use core6502::{AddressPolicy, CoreConfig};
//!
//! let config = CoreConfig::default()
//!     .with_memory_size(0x10000)
//!     .with_address_policy(AddressPolicy::Strict)
//!     .with_origin(0x8000);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.memory_size, 65536);
//! ```

use crate::ConfigError;

/// Largest addressable memory: the full 16-bit address space.
pub const MAX_MEMORY_SIZE: usize = 0x10000;

/// Memory size of the reference minimal system.
pub const DEFAULT_MEMORY_SIZE: usize = 2048;

/// How addresses beyond the configured memory size are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressPolicy {
    /// Addresses are taken modulo the memory size. Accesses never fail.
    #[default]
    Wrap,

    /// Addresses at or past the memory size yield `OutOfBoundsAddress`.
    Strict,
}

/// What a session does when the stream contains an opcode with no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOpcodePolicy {
    /// Enter the Halted state and report the error.
    #[default]
    Halt,

    /// Log a warning, advance PC past the byte and keep going.
    Skip,
}

/// Configuration for an emulated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    /// Number of bytes of memory allocated by `State::new` (1..=65536).
    pub memory_size: usize,

    /// Mapping applied to every memory access.
    pub address_policy: AddressPolicy,

    /// PC value corresponding to offset 0 of the instruction stream.
    pub origin: u16,

    /// Stack pointer loaded on power-on and reset.
    pub initial_sp: u8,

    /// Honor the D flag in ADC/SBC (NMOS 6502). The NES 2A03 has no BCD unit.
    pub decimal_mode: bool,

    /// Treat BRK as an explicit halt instead of vectoring through $FFFE.
    pub halt_on_brk: bool,

    /// Session behaviour on unknown opcodes.
    pub unknown_opcode: UnknownOpcodePolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            address_policy: AddressPolicy::Wrap,
            origin: 0x0000,
            initial_sp: 0xFD,
            decimal_mode: true,
            halt_on_brk: false,
            unknown_opcode: UnknownOpcodePolicy::Halt,
        }
    }
}

impl CoreConfig {
    /// Configuration matching the NES CPU: 2 KiB of work RAM, no decimal mode.
    pub fn nes() -> Self {
        Self {
            decimal_mode: false,
            ..Self::default()
        }
    }

    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn with_address_policy(mut self, address_policy: AddressPolicy) -> Self {
        self.address_policy = address_policy;
        self
    }

    pub fn with_origin(mut self, origin: u16) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_initial_sp(mut self, initial_sp: u8) -> Self {
        self.initial_sp = initial_sp;
        self
    }

    pub fn with_decimal_mode(mut self, decimal_mode: bool) -> Self {
        self.decimal_mode = decimal_mode;
        self
    }

    pub fn with_halt_on_brk(mut self, halt_on_brk: bool) -> Self {
        self.halt_on_brk = halt_on_brk;
        self
    }

    pub fn with_unknown_opcode(mut self, policy: UnknownOpcodePolicy) -> Self {
        self.unknown_opcode = policy;
        self
    }

    /// Checks that the configuration describes a constructible system.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidMemorySize` if `memory_size` is 0 or exceeds 64 KiB.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_size == 0 || self.memory_size > MAX_MEMORY_SIZE {
            return Err(ConfigError::InvalidMemorySize(self.memory_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();

        assert_eq!(config.memory_size, 2048);
        assert_eq!(config.address_policy, AddressPolicy::Wrap);
        assert_eq!(config.origin, 0x0000);
        assert_eq!(config.initial_sp, 0xFD);
        assert!(config.decimal_mode);
        assert!(!config.halt_on_brk);
        assert_eq!(config.unknown_opcode, UnknownOpcodePolicy::Halt);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nes_config_disables_decimal() {
        assert!(!CoreConfig::nes().decimal_mode);
    }

    #[test]
    fn test_builders_chain() {
        let config = CoreConfig::default()
            .with_origin(0x8000)
            .with_initial_sp(0xFF)
            .with_decimal_mode(false);

        assert_eq!(config.origin, 0x8000);
        assert_eq!(config.initial_sp, 0xFF);
        assert!(!config.decimal_mode);
    }

    #[test]
    fn test_validate_memory_size_bounds() {
        assert_eq!(
            CoreConfig::default().with_memory_size(0).validate(),
            Err(ConfigError::InvalidMemorySize(0))
        );
        assert_eq!(
            CoreConfig::default().with_memory_size(0x10001).validate(),
            Err(ConfigError::InvalidMemorySize(0x10001))
        );
        assert!(CoreConfig::default().with_memory_size(1).validate().is_ok());
        assert!(CoreConfig::default().with_memory_size(0x10000).validate().is_ok());
    }
}
