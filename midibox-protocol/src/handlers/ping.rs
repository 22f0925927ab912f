//! Ping
//!
//! A ping without data is answered with ACK(0). A ping carrying any data
//! byte is not answered: two devices wired back to back each see the other
//! one's reply as such a ping, which ends the echo.

use midibox_hal::SysexTx;

use super::{CommandHandler, Context};
use crate::command::Lifecycle;
use crate::frame::{AckCode, SYSEX_END};
use crate::target::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ping {
    data_received: bool,
}

impl CommandHandler for Ping {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    ) {
        match lifecycle {
            Lifecycle::Begin => self.data_received = false,
            Lifecycle::Cont => self.data_received = true,
            Lifecycle::End => {
                if byte == SYSEX_END && !self.data_received {
                    cx.reply(AckCode::Ack, 0x00);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::run;
    use crate::header::Variant;
    use crate::mock::{MockSurface, MockTx};
    use crate::session::RemoteSession;
    use midibox_hal::MidiPort;
    use Lifecycle::*;

    fn ping(events: &[(Lifecycle, u8)]) -> MockTx {
        let header = Variant::Sequencer.header(0);
        let mut surface = MockSurface::new();
        let mut session = RemoteSession::default();
        let mut tx = MockTx::new();
        let mut handler = Ping::default();
        run(
            &mut handler,
            MidiPort::Uart(0),
            &header,
            &mut surface,
            &mut session,
            &mut tx,
            events,
        );
        tx
    }

    #[test]
    fn test_bare_ping_is_acknowledged() {
        let tx = ping(&[(Begin, 0x0F), (End, 0xF7)]);
        assert_eq!(tx.frames.len(), 1);
        assert_eq!(tx.payload(0, 6), &[0x0F, 0x00]);
    }

    #[test]
    fn test_ping_with_data_is_silent() {
        let tx = ping(&[(Begin, 0x0F), (Cont, 0x00), (End, 0xF7)]);
        assert!(tx.frames.is_empty());
    }

    #[test]
    fn test_aborted_ping_is_silent() {
        let tx = ping(&[(Begin, 0x0F), (End, 0x90)]);
        assert!(tx.frames.is_empty());
    }
}
