//! Tests for memory sizing and the address policies.
//!
//! Tests cover:
//! - Wrap policy mapping every address modulo the memory size
//! - Strict policy reporting out-of-bounds accesses without partial effects
//! - Custom memory buses through `State::with_memory`

use core6502::{
    step, AddressPolicy, ConfigError, CoreConfig, Error, ExecutionError, FlatMemory, MemoryBus,
    State,
};

fn strict() -> State {
    let config = CoreConfig::default().with_address_policy(AddressPolicy::Strict);
    State::new(config).unwrap()
}

#[test]
fn test_default_memory_is_2k() {
    let state = State::default();
    assert_eq!(state.memory().size(), 2048);
    assert_eq!(state.config().memory_size, 2048);
}

#[test]
fn test_memory_size_bounds() {
    assert_eq!(
        State::new(CoreConfig::default().with_memory_size(0)).unwrap_err(),
        ConfigError::InvalidMemorySize(0)
    );
    assert_eq!(
        State::new(CoreConfig::default().with_memory_size(0x10001)).unwrap_err(),
        ConfigError::InvalidMemorySize(0x10001)
    );
    assert!(State::new(CoreConfig::default().with_memory_size(1)).is_ok());
    assert!(State::new(CoreConfig::default().with_memory_size(0x10000)).is_ok());
}

#[test]
fn test_wrap_aliases_high_addresses() {
    let mut state = State::default();
    state.set_a(0x66);

    // STA $FFFF lands on $07FF
    step(&mut state, &[0x8D, 0xFF, 0xFF], 0).unwrap();

    assert_eq!(state.read(0x07FF).unwrap(), 0x66);
}

#[test]
fn test_strict_load_out_of_bounds() {
    let mut state = strict();
    state.set_a(0x12);
    let before = state.registers();

    // LDA $0800
    let err = step(&mut state, &[0xAD, 0x00, 0x08], 0).unwrap_err();

    assert_eq!(
        err,
        Error::Execution(ExecutionError::OutOfBoundsAddress(0x0800))
    );
    assert_eq!(state.registers(), before);
}

#[test]
fn test_strict_indexed_out_of_bounds() {
    let mut state = strict();
    state.set_x(0x01);

    // LDA $07FF,X -> $0800
    let err = step(&mut state, &[0xBD, 0xFF, 0x07], 0).unwrap_err();

    assert_eq!(
        err,
        Error::Execution(ExecutionError::OutOfBoundsAddress(0x0800))
    );
}

#[test]
fn test_strict_rmw_out_of_bounds_has_no_partial_effect() {
    let mut state = strict();
    state.set_a(0x01);
    let before = state.clone();

    // SLO $4000
    let err = step(&mut state, &[0x0F, 0x00, 0x40], 0).unwrap_err();

    assert_eq!(
        err,
        Error::Execution(ExecutionError::OutOfBoundsAddress(0x4000))
    );
    assert_eq!(state.registers(), before.registers());
    assert_eq!(state.memory(), before.memory());
}

#[test]
fn test_strict_jsr_pushes_in_bounds() {
    let mut state = strict();

    // JSR $0010 only touches the stack page
    let next = step(&mut state, &[0x20, 0x10, 0x00], 0).unwrap();

    assert_eq!(next, 0x10);
}

/// Memory bus that records every write, to check that failed instructions
/// never reach the bus.
#[derive(Default)]
struct RecordingBus {
    inner: Vec<u8>,
    writes: Vec<(u16, u8)>,
}

impl MemoryBus for RecordingBus {
    fn read(&self, addr: u16) -> u8 {
        self.inner[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.writes.push((addr, value));
        self.inner[addr as usize] = value;
    }

    fn size(&self) -> usize {
        self.inner.len()
    }
}

#[test]
fn test_custom_bus_sees_committed_writes_only() {
    let bus = RecordingBus {
        inner: vec![0; 0x0800],
        writes: Vec::new(),
    };
    let config = CoreConfig::default().with_address_policy(AddressPolicy::Strict);
    let mut state = State::with_memory(bus, config);
    state.set_a(0x77);

    // STA $10 succeeds
    step(&mut state, &[0x85, 0x10], 0).unwrap();
    // STA $1000 fails
    step(&mut state, &[0x8D, 0x00, 0x10], 0).unwrap_err();

    assert_eq!(state.memory().writes, vec![(0x0010, 0x77)]);
}

#[test]
fn test_flat_memory_load() {
    let mut memory = FlatMemory::with_size(256);
    memory.load(0x00FE, &[1, 2, 3]);

    assert_eq!(memory.read(0x00FE), 1);
    assert_eq!(memory.read(0x00FF), 2);
    assert_eq!(memory.read(0x0000), 3);
}
