//! Serial MIDI transmission abstractions
//!
//! Provides the send primitive the SysEx layer hands finished frames to,
//! and the fixed serial settings of a MIDI DIN link.

use crate::port::MidiPort;

/// MIDI 1.0 serial baud rate
pub const MIDI_BAUDRATE: u32 = 31_250;

/// SysEx transmitter
///
/// Implementations enqueue a complete frame (from 0xF0 through 0xF7) for
/// the given output port. Sharing one physical output between several
/// senders is the implementation's concern: it must serialize whole frames.
pub trait SysexTx {
    /// Error type for transmit operations
    type Error;

    /// Queue one complete SysEx frame on `port`
    fn send_sysex(&mut self, port: MidiPort, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<T: SysexTx + ?Sized> SysexTx for &mut T {
    type Error = T::Error;

    fn send_sysex(&mut self, port: MidiPort, frame: &[u8]) -> Result<(), Self::Error> {
        (**self).send_sysex(port, frame)
    }
}

/// UART configuration for a MIDI link
#[derive(Debug, Clone, Copy)]
pub struct MidiUartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (always 8 on a compliant link)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for MidiUartConfig {
    fn default() -> Self {
        Self {
            baudrate: MIDI_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}
