//! Response emitter
//!
//! Wraps ACK/DISACK codes or arbitrary payloads into a complete frame and
//! hands it to the transport of the port the request came in on.

use midibox_hal::{MidiPort, SysexTx};

use crate::frame::{encode_frame, AckCode, ResponseError};

/// Frame builder bound to one port and header prefix
pub struct ResponseEmitter<'a, T> {
    port: MidiPort,
    prefix: &'a [u8],
    tx: &'a mut T,
}

impl<'a, T: SysexTx> ResponseEmitter<'a, T> {
    /// `prefix` is the variant header including the device ID byte where
    /// the variant has one.
    pub fn new(port: MidiPort, prefix: &'a [u8], tx: &'a mut T) -> Self {
        Self { port, prefix, tx }
    }

    /// Frame `payload` and send it
    ///
    /// Payloads are protocol constants; an oversized one is a bug in the
    /// caller.
    pub fn send_framed(&mut self, payload: &[u8]) -> Result<(), ResponseError> {
        let frame = encode_frame(self.prefix, payload);
        debug_assert!(frame.is_ok(), "response payload exceeds frame size");
        let frame = frame?;

        self.tx
            .send_sysex(self.port, &frame)
            .map_err(|_| ResponseError::Transport)
    }

    /// Send `[code, arg]`
    pub fn send_ack(&mut self, code: AckCode, arg: u8) -> Result<(), ResponseError> {
        self.send_framed(&[code.to_byte(), arg])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Variant;
    use crate::mock::MockTx;

    #[test]
    fn test_ack_frame_with_device_id() {
        let header = Variant::Sequencer.header(0x05);
        let mut tx = MockTx::new();
        let mut emitter = ResponseEmitter::new(MidiPort::Uart(1), &header, &mut tx);

        emitter.send_ack(AckCode::Ack, 0x01).unwrap();

        assert_eq!(tx.frames.len(), 1);
        let (port, frame) = &tx.frames[0];
        assert_eq!(*port, MidiPort::Uart(1));
        assert_eq!(
            frame.as_slice(),
            &[0xF0, 0x00, 0x00, 0x7E, 0x4D, 0x05, 0x0F, 0x01, 0xF7]
        );
    }

    #[test]
    fn test_disack_frame_without_device_id() {
        let header = Variant::Mixer.header(0x05);
        let mut tx = MockTx::new();
        let mut emitter = ResponseEmitter::new(MidiPort::Usb(0), &header, &mut tx);

        emitter.send_ack(AckCode::Disack, 0x0C).unwrap();

        assert_eq!(
            tx.frames[0].1.as_slice(),
            &[0xF0, 0x00, 0x01, 0x0F, 0x00, 0x11, 0x00, 0x0E, 0x0C, 0xF7]
        );
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let header = Variant::Mixer.header(0);
        let mut tx = MockTx::failing();
        let mut emitter = ResponseEmitter::new(MidiPort::Uart(0), &header, &mut tx);

        assert_eq!(
            emitter.send_ack(AckCode::Ack, 0),
            Err(ResponseError::Transport)
        );
    }
}
