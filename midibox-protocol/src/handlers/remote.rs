//! Remote control
//!
//! Session-oriented sub-protocol of the sequencer. The first data byte is
//! a sub-command:
//!
//! | byte | sub-command | data                           | precondition          |
//! |------|-------------|--------------------------------|-----------------------|
//! | 0x00 | OFF         | -                              | mode Auto             |
//! | 0x01 | ON          | -                              | mode Auto             |
//! | 0x02 | LCD         | X, Y, characters...            | session held by port  |
//! | 0x03 | CHARSET     | charset                        | session held by port  |
//!
//! A session held by another port rejects everything with ALLOCATED.
//! The reply is sent on EOX: DISACK with the sub-command when it was not
//! valid, DISACK(less bytes than expected) when fields are missing, ACK with
//! the sub-command otherwise. Complete LCD writes are not acknowledged.

use midibox_hal::SysexTx;

use super::{CommandHandler, Context};
use crate::command::Lifecycle;
use crate::frame::{AckCode, DisackReason, SYSEX_END};
use crate::session::RemoteCommand;
use crate::target::{Surface, LINE_STRIDE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteControl {
    received: bool,
    valid: bool,
    complete: bool,
    no_ack: bool,
    command: RemoteCommand,
    x: Option<u8>,
    y: Option<u8>,
}

impl RemoteControl {
    pub fn command(&self) -> RemoteCommand {
        self.command
    }

    fn accept(&mut self, command: RemoteCommand, complete: bool) {
        self.command = command;
        self.valid = true;
        self.complete = complete;
    }

    fn sub_command<S: Surface, T: SysexTx>(&mut self, byte: u8, cx: &mut Context<'_, S, T>) {
        if cx.session.is_held_by_other(cx.port) {
            debug!("remote request from {} rejected, session allocated", cx.port);
            self.command = RemoteCommand::Allocated;
            return;
        }

        let requests_allowed = cx.session.mode().accepts_requests();
        let held = cx.session.is_held_by(cx.port);

        match RemoteCommand::from_byte(byte) {
            Some(RemoteCommand::Off) if requests_allowed => {
                cx.session.close();
                self.accept(RemoteCommand::Off, true);
                debug!("remote session closed by {}", cx.port);
            }
            Some(RemoteCommand::On) if requests_allowed => {
                cx.session.open(cx.port);
                cx.surface.clear();
                cx.surface.request_redraw();
                self.accept(RemoteCommand::On, true);
                debug!("remote session opened by {}", cx.port);
            }
            Some(RemoteCommand::Lcd) if held => {
                self.accept(RemoteCommand::Lcd, false);
                self.no_ack = true;
            }
            Some(RemoteCommand::Charset) if held => {
                self.accept(RemoteCommand::Charset, false);
            }
            Some(_) => self.command = RemoteCommand::Disabled,
            None => self.command = RemoteCommand::Error,
        }
    }

    fn data<S: Surface, T: SysexTx>(&mut self, byte: u8, cx: &mut Context<'_, S, T>) {
        match self.command {
            RemoteCommand::Lcd => match (self.x, self.y) {
                (None, _) => self.x = Some(byte),
                (Some(_), None) => {
                    self.y = Some(byte);
                    self.complete = true;
                }
                // Characters past the end of the line are dropped
                (Some(x), Some(_)) if x >= LINE_STRIDE => {}
                (Some(x), Some(y)) => {
                    cx.surface.set_cursor_xy(x, y);
                    cx.surface.write_char(byte);
                    cx.surface.request_redraw();
                    self.x = Some(x + 1);
                }
            },
            RemoteCommand::Charset if !self.complete => {
                cx.surface.set_special_charset(byte);
                self.complete = true;
            }
            _ => {}
        }
    }

    fn finish<S: Surface, T: SysexTx>(&mut self, cx: &mut Context<'_, S, T>) {
        if !self.valid {
            cx.reply(AckCode::Disack, self.command.to_byte());
        } else if !self.complete {
            cx.reply(AckCode::Disack, DisackReason::LessBytesThanExpected.to_byte());
        } else if !self.no_ack {
            cx.reply(AckCode::Ack, self.command.to_byte());
        }
    }
}

impl CommandHandler for RemoteControl {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    ) {
        match lifecycle {
            Lifecycle::Begin => *self = Self::default(),
            Lifecycle::Cont => {
                if !self.received {
                    self.received = true;
                    self.sub_command(byte, cx);
                } else if self.valid {
                    self.data(byte, cx);
                }
            }
            Lifecycle::End => {
                if byte == SYSEX_END {
                    self.finish(cx);
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
    use crate::mock::{Call, MockSurface, MockTx};
    use crate::session::{RemoteMode, RemoteSession};
    use midibox_hal::MidiPort;
    use Lifecycle::*;

    const A: MidiPort = MidiPort::Uart(0);
    const B: MidiPort = MidiPort::Uart(1);
    const PREFIX_LEN: usize = 6;

    struct Rig {
        surface: MockSurface,
        session: RemoteSession,
        tx: MockTx,
    }

    impl Rig {
        fn new(mode: RemoteMode) -> Self {
            Self {
                surface: MockSurface::new(),
                session: RemoteSession::new(mode),
                tx: MockTx::new(),
            }
        }

        /// Send BEGIN, one CONT per data byte, END(0xF7)
        fn send(&mut self, port: MidiPort, data: &[u8]) {
            let header = Variant::Sequencer.header(0);
            let mut events: heapless::Vec<(Lifecycle, u8), 32> = heapless::Vec::new();
            events.push((Begin, 0x09)).unwrap();
            for &byte in data {
                events.push((Cont, byte)).unwrap();
            }
            events.push((End, 0xF7)).unwrap();

            let mut handler = RemoteControl::default();
            run(
                &mut handler,
                port,
                &header,
                &mut self.surface,
                &mut self.session,
                &mut self.tx,
                &events,
            );
        }

        fn last_reply(&self) -> Option<&[u8]> {
            let n = self.tx.frames.len();
            (n > 0).then(|| self.tx.payload(n - 1, PREFIX_LEN))
        }
    }

    #[test]
    fn test_on_grants_session() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);

        assert_eq!(rig.session.owner(), Some(A));
        assert_eq!(rig.last_reply(), Some(&[0x0F, 0x01][..]));
        assert!(rig.surface.calls.contains(&Call::Clear));
        assert_eq!(rig.tx.frames[0].0, A);
    }

    #[test]
    fn test_second_port_gets_allocated() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(B, &[0x01]);

        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7E][..]));
        assert_eq!(rig.tx.frames[1].0, B);
        assert_eq!(rig.session.owner(), Some(A));

        // OFF from the intruder cannot close A's session either
        rig.send(B, &[0x00]);
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7E][..]));
        assert_eq!(rig.session.owner(), Some(A));
    }

    #[test]
    fn test_second_port_cannot_write_lcd_or_charset() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.surface.calls.clear();

        rig.send(B, &[0x02, 0, 0, b'x', b'y']);
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7E][..]));
        assert!(rig.surface.chars().is_empty());

        rig.send(B, &[0x03, 0x01]);
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7E][..]));
        assert!(!rig.surface.calls.contains(&Call::Charset(0x01)));

        assert_eq!(rig.tx.frames[2].0, B);
        assert_eq!(rig.session.owner(), Some(A));
    }

    #[test]
    fn test_fixed_mode_disables_off() {
        for mode in [RemoteMode::Server, RemoteMode::Client] {
            let mut rig = Rig::new(mode);
            rig.session.open(A);
            rig.send(A, &[0x00]);

            assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7D][..]));
            assert_eq!(rig.session.owner(), Some(A));
        }
    }

    #[test]
    fn test_charset_without_session_is_disabled() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x03, 0x02]);

        assert!(rig.surface.calls.is_empty());
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7D][..]));
        assert_eq!(rig.session.owner(), None);
    }

    #[test]
    fn test_off_closes_session() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(A, &[0x00]);

        assert_eq!(rig.session.owner(), None);
        assert_eq!(rig.last_reply(), Some(&[0x0F, 0x00][..]));
    }

    #[test]
    fn test_fixed_mode_disables_on() {
        let mut rig = Rig::new(RemoteMode::Client);
        rig.send(A, &[0x01]);

        assert_eq!(rig.session.owner(), None);
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7D][..]));
    }

    #[test]
    fn test_lcd_without_session_is_disabled() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x02, 0, 0, b'x']);

        assert!(rig.surface.chars().is_empty());
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7D][..]));
    }

    #[test]
    fn test_lcd_writes_without_ack() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(A, &[0x02, 3, 1, b'h', b'i']);

        assert_eq!(
            rig.surface.chars().as_slice(),
            &[(0x43, b'h'), (0x44, b'i')]
        );
        assert!(rig.surface.redraw);
        // Only the ON reply went out
        assert_eq!(rig.tx.frames.len(), 1);
    }

    #[test]
    fn test_lcd_drops_characters_past_line_end() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(A, &[0x02, 0x3E, 0, b'a', b'b', b'c', b'd']);

        assert_eq!(
            rig.surface.chars().as_slice(),
            &[(0x3E, b'a'), (0x3F, b'b')]
        );
    }

    #[test]
    fn test_lcd_missing_coordinates_is_incomplete() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(A, &[0x02, 3]);

        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x01][..]));
    }

    #[test]
    fn test_charset_accepts_any_value() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(A, &[0x03, 0x7F]);

        assert!(rig.surface.calls.contains(&Call::Charset(0x7F)));
        assert_eq!(rig.last_reply(), Some(&[0x0F, 0x03][..]));
    }

    #[test]
    fn test_charset_missing_value_is_incomplete() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x01]);
        rig.send(A, &[0x03]);

        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x01][..]));
    }

    #[test]
    fn test_unknown_sub_command_is_error() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[0x05]);
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7F][..]));
    }

    #[test]
    fn test_missing_sub_command_is_error() {
        let mut rig = Rig::new(RemoteMode::Auto);
        rig.send(A, &[]);
        assert_eq!(rig.last_reply(), Some(&[0x0E, 0x7F][..]));
    }

    #[test]
    fn test_abort_sends_nothing() {
        let header = Variant::Sequencer.header(0);
        let mut rig = Rig::new(RemoteMode::Auto);
        let mut handler = RemoteControl::default();
        run(
            &mut handler,
            A,
            &header,
            &mut rig.surface,
            &mut rig.session,
            &mut rig.tx,
            &[(Begin, 0x09), (Cont, 0x01), (End, 0xB0)],
        );

        assert!(rig.tx.frames.is_empty());
        // The session grant is not rolled back
        assert_eq!(rig.session.owner(), Some(A));
    }
}
