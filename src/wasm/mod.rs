//! WebAssembly bindings for the 6502 core.
//!
//! This module exposes a JavaScript-callable session so that 6502 byte
//! streams can be stepped and inspected from a browser.

pub mod api;

pub use api::{Emulator6502, JsError};
