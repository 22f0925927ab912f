//! Board-agnostic core logic for MIDIbox control surface firmware
//!
//! This crate contains the application side of the SysEx protocol that
//! does not depend on specific hardware:
//!
//! - LCD character buffer and rotary/digit value table written by commands
//! - Control surface bundling both behind the protocol's target traits
//! - Multi-port router with idle timeouts
//! - Persisted protocol configuration

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod lcd;
pub mod router;
pub mod surface;
pub mod values;

pub use config::{ConfigError, SysexConfig};
pub use lcd::LcdBuffer;
pub use router::{RouterError, SysexRouter};
pub use surface::ControlSurface;
pub use values::ValueTable;
