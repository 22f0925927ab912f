//! Streaming SysEx parser
//!
//! One [`SysexParser`] serves one variant on one port. Bytes are fed one at
//! a time and processed to completion: header matching, command dispatch,
//! handler action and any reply all happen inside [`SysexParser::feed`].
//!
//! State machine:
//!
//! ```text
//!            header byte ok          last header byte
//!  ┌──────┐ ───────────────► ┌────────┐ ───────────► ┌──────────┐
//!  │ Idle │                  │ Header │              │ Command? │
//!  └──────┘ ◄─────────────── └────────┘              └──────────┘
//!     ▲        mismatch                     data byte  │      │ status byte
//!     │                                  (known id)    ▼      ▼
//!     │                               ┌─────────────────┐   reset
//!     └────── EOX / status / timeout ─│ Command (BEGIN, │
//!                                     │ CONT..., END)   │
//!                                     └─────────────────┘
//! ```

use midibox_hal::{MidiPort, SysexTx};

use crate::command::{lookup, Lifecycle};
use crate::frame::{is_realtime, is_status, AckCode, DisackReason, SYSEX_END};
use crate::handlers::{CommandHandler, CommandState, Context};
use crate::header::{Header, HeaderMatcher, Match, Variant};
use crate::response::ResponseEmitter;
use crate::session::RemoteSession;
use crate::target::Surface;

/// Parser options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserConfig {
    /// Ignore MIDI realtime bytes (0xF8-0xFF) instead of treating them as
    /// status bytes that abort the current message
    pub realtime_passthrough: bool,
}

/// Outcome of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseStatus {
    /// Byte is not part of this protocol; forward it to other consumers
    Ignored,
    /// Byte advanced the header match
    Header,
    /// Byte completed the header
    HeaderComplete,
    /// Byte was consumed as command or data byte
    Command,
    /// Byte terminated the current message (EOX or rejected command)
    Finished,
    /// Status byte aborted the current message; it starts something else
    Aborted,
}

impl ParseStatus {
    /// True if the byte belongs to this protocol alone
    ///
    /// Header bytes are shared with every other protocol on the stream and
    /// an aborting status byte starts a new message, so neither is claimed.
    pub fn is_claimed(self) -> bool {
        matches!(self, ParseStatus::Command | ParseStatus::Finished)
    }
}

/// Per-port parse state
///
/// Returns to its default value after every completed, aborted or timed
/// out message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserState {
    header: HeaderMatcher,
    command_seen: bool,
    command_id: u8,
    command: CommandState,
}

impl ParserState {
    pub const fn new() -> Self {
        Self {
            header: HeaderMatcher::new(),
            command_seen: false,
            command_id: 0,
            command: CommandState::Idle,
        }
    }

    /// Header bytes matched so far
    pub fn header_match_count(&self) -> u8 {
        self.header.matched()
    }

    /// True while command and data bytes are being consumed
    pub fn header_matched(&self) -> bool {
        self.header.is_complete()
    }

    pub fn command_seen(&self) -> bool {
        self.command_seen
    }

    /// ID of the active command
    pub fn command_id(&self) -> Option<u8> {
        self.command_seen.then_some(self.command_id)
    }

    pub fn command(&self) -> &CommandState {
        &self.command
    }
}

/// SysEx parser for one variant on one port
#[derive(Debug, Clone)]
pub struct SysexParser {
    port: MidiPort,
    variant: Variant,
    header: Header,
    config: ParserConfig,
    state: ParserState,
}

impl SysexParser {
    pub fn new(port: MidiPort, variant: Variant, device_id: u8) -> Self {
        Self {
            port,
            variant,
            header: variant.header(device_id),
            config: ParserConfig::default(),
            state: ParserState::new(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn port(&self) -> MidiPort {
        self.port
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Header as matched on input and prefixed to replies
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// True while a message is in progress past its header
    pub fn is_receiving(&self) -> bool {
        self.state.header_matched()
    }

    /// Drop any partial message
    pub fn reset(&mut self) {
        self.state = ParserState::new();
    }

    /// Feed one byte received on this parser's port
    pub fn feed<S: Surface, T: SysexTx>(
        &mut self,
        byte: u8,
        surface: &mut S,
        session: &mut RemoteSession,
        tx: &mut T,
    ) -> ParseStatus {
        if self.config.realtime_passthrough && is_realtime(byte) {
            return ParseStatus::Ignored;
        }

        if !self.state.header.is_complete() {
            return match self.state.header.feed(&self.header, byte) {
                Match::NoMatch => {
                    self.reset();
                    ParseStatus::Ignored
                }
                Match::Matching => ParseStatus::Header,
                Match::HeaderComplete => {
                    trace!("{} header complete on {}", self.variant, self.port);
                    ParseStatus::HeaderComplete
                }
            };
        }

        let responder = ResponseEmitter::new(self.port, &self.header, tx);
        let mut cx = Context::new(self.port, surface, session, responder);

        if is_status(byte) {
            if self.state.command_seen {
                self.state.command.handle(Lifecycle::End, byte, &mut cx);
            }
            self.state = ParserState::new();
            if byte != SYSEX_END {
                debug!("message aborted by status {=u8:#x} on {}", byte, self.port);
                return ParseStatus::Aborted;
            }
            return ParseStatus::Finished;
        }

        if self.state.command_seen {
            self.state.command.handle(Lifecycle::Cont, byte, &mut cx);
            return ParseStatus::Command;
        }

        match lookup(self.variant.commands(), byte) {
            Some(kind) => {
                trace!("command {=u8:#x} ({}) on {}", byte, kind, self.port);
                self.state.command_seen = true;
                self.state.command_id = byte;
                self.state.command = CommandState::begin(kind);
                self.state.command.handle(Lifecycle::Begin, byte, &mut cx);
                ParseStatus::Command
            }
            None => {
                warn!("invalid command {=u8:#x} on {}", byte, self.port);
                cx.reply(AckCode::Disack, DisackReason::InvalidCommand.to_byte());
                self.state = ParserState::new();
                ParseStatus::Finished
            }
        }
    }

    /// Abort a message in progress on `port` without replying
    ///
    /// Returns true if a partial message was discarded.
    pub fn on_timeout(&mut self, port: MidiPort) -> bool {
        if port != self.port || !self.state.header_matched() {
            return false;
        }
        debug!("{} message timed out on {}", self.variant, self.port);
        self.reset();
        true
    }
}
