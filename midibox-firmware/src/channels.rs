//! Inter-task communication channels
//!
//! Outgoing SysEx frames are queued per MIDI output. A frame is only ever
//! written by the port's TX task, so whole frames never interleave.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use midibox_protocol::frame::FrameBuf;

/// Number of serial MIDI ports
pub const MIDI_PORT_COUNT: usize = 2;

/// Frames waiting per output
const TX_QUEUE_SIZE: usize = 4;

pub type FrameChannel = Channel<CriticalSectionRawMutex, FrameBuf, TX_QUEUE_SIZE>;

/// Outgoing frames, indexed by UART number
pub static MIDI_OUT: [FrameChannel; MIDI_PORT_COUNT] = [Channel::new(), Channel::new()];

/// Signal that the surface state changed and should be redrawn
pub static SURFACE_CHANGED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
