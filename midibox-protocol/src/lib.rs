//! MIDIbox SysEx command framing
//!
//! This crate implements the byte-oriented SysEx parser shared by the
//! MIDIbox mixer surface and the MIDIbox sequencer. Bytes arrive one at a
//! time from a MIDI port; the parser recognises its own device header,
//! dispatches the command that follows to a handler and answers with
//! ACK/DISACK frames where the protocol asks for them.
//!
//! # Wire format
//!
//! ```text
//! ┌──────────────┬─────────┬──────────────┬──────┐
//! │ HEADER       │ COMMAND │ DATA         │ EOX  │
//! │ 5-7B (F0...) │ 1B      │ 0..n B <0x80 │ 0xF7 │
//! └──────────────┴─────────┴──────────────┴──────┘
//! ```
//!
//! Header matching is non-exclusive: a byte that does not continue the
//! header is handed back as [`ParseStatus::Ignored`] so other protocols
//! sharing the same MIDI stream still see it.
//!
//! # Variants
//!
//! - [`Variant::Mixer`] - LCD text, rotary pointers and LED digits
//! - [`Variant::Sequencer`] - remote control sessions and ping

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod command;
pub mod frame;
pub mod handlers;
pub mod header;
pub mod parser;
pub mod response;
pub mod session;
pub mod target;

#[cfg(test)]
pub(crate) mod mock;

pub use command::{CommandEntry, CommandKind, Lifecycle};
pub use frame::{AckCode, DisackReason, ResponseError, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, SYSEX_END, SYSEX_START};
pub use handlers::{CommandHandler, CommandState, Context};
pub use header::{HeaderMatcher, Match, Variant};
pub use parser::{ParseStatus, ParserConfig, ParserState, SysexParser};
pub use response::ResponseEmitter;
pub use session::{RemoteCommand, RemoteMode, RemoteSession};
pub use target::{DisplayTarget, Surface, ValueTarget};
