//! MIDIbox Hardware Abstraction Layer
//!
//! This crate defines the transport-facing traits the SysEx protocol layer
//! talks to. Chip-specific firmware implements them on top of its UART or
//! USB drivers, so the protocol code stays testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  midibox-protocol / midibox-core        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  midibox-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  midibox-firmware (embassy-rp UARTs)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`port::MidiPort`] - Identifies a physical MIDI input/output
//! - [`uart::SysexTx`] - Framed SysEx transmission

#![no_std]
#![deny(unsafe_code)]

pub mod port;
pub mod uart;

// Re-export key types at crate root for convenience
pub use port::MidiPort;
pub use uart::{MidiUartConfig, SysexTx, MIDI_BAUDRATE};
