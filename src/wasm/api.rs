//! WASM API for the 6502 core.
//!
//! Provides JavaScript-callable interfaces for session control and state
//! inspection.

use crate::{CoreConfig, Cpu, Error, StopReason};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<Error> for JsError {
    fn from(err: Error) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: Cpu,
    program: Vec<u8>,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create a session with `memory_size` bytes of zeroed memory
    #[wasm_bindgen(constructor)]
    pub fn new(memory_size: usize) -> Result<Emulator6502, JsError> {
        let config = CoreConfig::default().with_memory_size(memory_size);
        let cpu = Cpu::new(config).map_err(|e| JsError::new(&e.to_string()))?;

        Ok(Emulator6502 {
            cpu,
            program: Vec::new(),
        })
    }

    /// Load a program stream at `origin` and reset the registers.
    ///
    /// The bytes are also copied into memory so the memory view shows them.
    pub fn load_program(&mut self, program: &[u8], origin: u16) {
        let config = self.cpu.state().config().with_origin(origin);
        let mut memory = self.cpu.state().memory().clone();
        memory.load(origin, program);

        self.cpu = Cpu::with_memory(memory, config);
        self.program = program.to_vec();
    }

    /// Execute a single instruction and return the new cursor
    pub fn step(&mut self) -> Result<usize, JsError> {
        Ok(self.cpu.step(&self.program)?)
    }

    /// Execute up to `max_instructions` and return how many ran.
    ///
    /// Stops early at the end of the program or when the session halts.
    pub fn run(&mut self, max_instructions: u32) -> Result<u32, JsError> {
        let summary = self.cpu.run(&self.program, Some(max_instructions as u64))?;
        if let StopReason::Halted(err) = summary.stop {
            log::debug!("program halted: {}", err);
        }
        Ok(summary.instructions as u32)
    }

    /// Reset the registers to power-on values. Memory is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.state().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.state().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.state().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.state().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.state().sp()
    }

    /// Packed status byte (NV-BDIZC)
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.state().status()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[wasm_bindgen(getter)]
    pub fn instructions(&self) -> f64 {
        self.cpu.instructions_executed() as f64 // Convert u64 to f64 for JavaScript
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> Result<u8, JsError> {
        Ok(self.cpu.state().read(addr).map_err(Error::from)?)
    }

    /// Snapshot of the whole memory
    pub fn memory(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.cpu.state().memory().as_slice())
    }
}
