//! State shared between the RX and tick tasks
//!
//! Byte processing and timeouts both mutate the router, so both go through
//! one blocking mutex. Every access is short and never awaits.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use midibox_core::{ControlSurface, SysexRouter};

use crate::channels::MIDI_PORT_COUNT;

/// One parser per variant on each port
pub const MAX_PARSERS: usize = 2 * MIDI_PORT_COUNT;

pub struct Shared {
    pub router: SysexRouter<MAX_PARSERS>,
    pub surface: ControlSurface,
}

pub type SharedState = Mutex<CriticalSectionRawMutex, RefCell<Shared>>;
