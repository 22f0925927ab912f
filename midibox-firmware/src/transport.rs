//! Queue-backed SysEx transmitter

use midibox_hal::{MidiPort, SysexTx};
use midibox_protocol::frame::FrameBuf;

use crate::channels::MIDI_OUT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxError {
    /// Port has no output on this board
    NoSuchPort,
    /// Frame larger than a queue slot
    FrameTooLarge,
    /// Output queue full
    QueueFull,
}

/// Hands frames to the TX task of the addressed port
///
/// Never blocks: parsing runs inside a critical section, so a full queue
/// drops the frame.
pub struct QueueTx;

impl SysexTx for QueueTx {
    type Error = TxError;

    fn send_sysex(&mut self, port: MidiPort, frame: &[u8]) -> Result<(), TxError> {
        if !port.is_uart() {
            return Err(TxError::NoSuchPort);
        }
        let channel = MIDI_OUT
            .get(port.index() as usize)
            .ok_or(TxError::NoSuchPort)?;
        let frame = FrameBuf::from_slice(frame).map_err(|_| TxError::FrameTooLarge)?;
        channel.try_send(frame).map_err(|_| TxError::QueueFull)
    }
}
