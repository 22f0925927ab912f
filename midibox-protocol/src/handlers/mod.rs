//! Command handlers
//!
//! Every command receives BEGIN with its command byte, CONT for each data
//! byte and END with the status byte that closed the message. State that
//! must survive between bytes lives in the handler struct, which the parser
//! creates fresh on BEGIN and drops when the message ends.

pub mod digits;
pub mod display_text;
pub mod ping;
pub mod remote;
pub mod rotary;

use midibox_hal::{MidiPort, SysexTx};

use crate::command::{CommandKind, Lifecycle};
use crate::frame::AckCode;
use crate::response::ResponseEmitter;
use crate::session::RemoteSession;
use crate::target::Surface;

pub use digits::WriteDigits;
pub use display_text::WriteDisplayText;
pub use ping::Ping;
pub use remote::RemoteControl;
pub use rotary::WriteRotaryValue;

/// Everything a handler may act on while processing one byte
pub struct Context<'a, S, T> {
    /// Port the byte arrived on
    pub port: MidiPort,
    pub surface: &'a mut S,
    /// Device-wide remote session
    pub session: &'a mut RemoteSession,
    /// Responses go back out on `port`
    pub responder: ResponseEmitter<'a, T>,
}

impl<'a, S: Surface, T: SysexTx> Context<'a, S, T> {
    pub fn new(
        port: MidiPort,
        surface: &'a mut S,
        session: &'a mut RemoteSession,
        responder: ResponseEmitter<'a, T>,
    ) -> Self {
        Self {
            port,
            surface,
            session,
            responder,
        }
    }

    /// Send an acknowledge; transport failures are logged and dropped
    pub fn reply(&mut self, code: AckCode, arg: u8) {
        match self.responder.send_ack(code, arg) {
            Ok(()) => trace!("reply {} {=u8:#x} on {}", code, arg, self.port),
            Err(e) => warn!("reply dropped on {}: {}", self.port, e),
        }
    }
}

/// A command's byte-level state machine
pub trait CommandHandler {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    );
}

/// Sub-state of the command currently being received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandState {
    /// No command byte seen yet
    #[default]
    Idle,
    DisplayText(WriteDisplayText),
    RotaryValue(WriteRotaryValue),
    Digits(WriteDigits),
    Remote(RemoteControl),
    Ping(Ping),
}

impl CommandState {
    /// Fresh sub-state for a command of `kind`
    pub fn begin(kind: CommandKind) -> Self {
        match kind {
            CommandKind::WriteDisplayText => CommandState::DisplayText(WriteDisplayText::default()),
            CommandKind::WriteRotaryValue => CommandState::RotaryValue(WriteRotaryValue::default()),
            CommandKind::WriteDigits => CommandState::Digits(WriteDigits::default()),
            CommandKind::RemoteControl => CommandState::Remote(RemoteControl::default()),
            CommandKind::Ping => CommandState::Ping(Ping::default()),
        }
    }
}

impl CommandHandler for CommandState {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    ) {
        match self {
            CommandState::Idle => {}
            CommandState::DisplayText(h) => h.handle(lifecycle, byte, cx),
            CommandState::RotaryValue(h) => h.handle(lifecycle, byte, cx),
            CommandState::Digits(h) => h.handle(lifecycle, byte, cx),
            CommandState::Remote(h) => h.handle(lifecycle, byte, cx),
            CommandState::Ping(h) => h.handle(lifecycle, byte, cx),
        }
    }
}

/// Drive a handler through a byte sequence against mocks
#[cfg(test)]
pub(crate) fn run<H: CommandHandler>(
    handler: &mut H,
    port: MidiPort,
    header: &[u8],
    surface: &mut crate::mock::MockSurface,
    session: &mut RemoteSession,
    tx: &mut crate::mock::MockTx,
    events: &[(Lifecycle, u8)],
) {
    let responder = ResponseEmitter::new(port, header, tx);
    let mut cx = Context::new(port, surface, session, responder);
    for &(lifecycle, byte) in events {
        handler.handle(lifecycle, byte, &mut cx);
    }
}
