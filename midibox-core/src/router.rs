//! Multi-port SysEx router
//!
//! Owns one parser per (port, variant) pair and the remote session they
//! share. Bytes from a port are offered to every parser on that port; a
//! byte is claimed when any parser consumed it as part of a command.
//! Unclaimed bytes belong to the general MIDI path.
//!
//! The router has no clock of its own. The caller reports elapsed time
//! through [`SysexRouter::tick`] and parsers left mid-message for longer
//! than the configured timeout are reset.

use heapless::Vec;
use midibox_hal::{MidiPort, SysexTx};
use midibox_protocol::{ParserConfig, RemoteSession, Surface, SysexParser, Variant};

use crate::config::{SysexConfig, DEFAULT_TIMEOUT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RouterError {
    /// All parser slots are in use
    TooManyParsers,
    /// A parser for this port and variant already exists
    DuplicateParser,
}

#[derive(Debug)]
struct Slot {
    parser: SysexParser,
    /// Time since the last byte on this parser's port
    idle_ms: u32,
}

/// Routes incoming bytes to up to `N` parsers
#[derive(Debug)]
pub struct SysexRouter<const N: usize> {
    slots: Vec<Slot, N>,
    session: RemoteSession,
    device_id: u8,
    timeout_ms: u32,
    parser_config: ParserConfig,
}

impl<const N: usize> Default for SysexRouter<N> {
    fn default() -> Self {
        Self::new(0x00)
    }
}

impl<const N: usize> SysexRouter<N> {
    /// Create an empty router using `device_id` for the sequencer header
    pub fn new(device_id: u8) -> Self {
        Self {
            slots: Vec::new(),
            session: RemoteSession::default(),
            device_id,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            parser_config: ParserConfig::default(),
        }
    }

    /// Create a router serving every enabled variant on each of `ports`
    pub fn from_config(config: &SysexConfig, ports: &[MidiPort]) -> Result<Self, RouterError> {
        let mut router = Self::new(config.device_id);
        router.timeout_ms = config.timeout_ms;
        router.parser_config = config.parser_config();
        router.session.set_mode(config.remote_mode);

        for &port in ports {
            for variant in config.variants() {
                router.add_port(port, variant)?;
            }
        }
        Ok(router)
    }

    /// Register a parser for `variant` on `port`
    pub fn add_port(&mut self, port: MidiPort, variant: Variant) -> Result<(), RouterError> {
        if self
            .parsers()
            .any(|p| p.port() == port && p.variant() == variant)
        {
            return Err(RouterError::DuplicateParser);
        }

        let parser = SysexParser::new(port, variant, self.device_id).with_config(self.parser_config);
        self.slots
            .push(Slot { parser, idle_ms: 0 })
            .map_err(|_| RouterError::TooManyParsers)?;
        debug!("{} parser added on {}", variant, port);
        Ok(())
    }

    /// Feed one byte received on `port`
    ///
    /// Returns true if the byte was consumed by a SysEx command and must
    /// not be forwarded to the general MIDI path.
    pub fn receive<S: Surface, T: SysexTx>(
        &mut self,
        port: MidiPort,
        byte: u8,
        surface: &mut S,
        tx: &mut T,
    ) -> bool {
        let mut claimed = false;
        for slot in self.slots.iter_mut().filter(|s| s.parser.port() == port) {
            let status = slot.parser.feed(byte, surface, &mut self.session, tx);
            slot.idle_ms = 0;
            claimed |= status.is_claimed();
        }
        claimed
    }

    /// Advance idle timers by `elapsed_ms`
    ///
    /// Returns the number of partial messages dropped.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        let mut dropped = 0;
        for slot in self.slots.iter_mut() {
            if !slot.parser.is_receiving() {
                slot.idle_ms = 0;
                continue;
            }
            slot.idle_ms = slot.idle_ms.saturating_add(elapsed_ms);
            if slot.idle_ms >= self.timeout_ms {
                let port = slot.parser.port();
                if slot.parser.on_timeout(port) {
                    dropped += 1;
                }
                slot.idle_ms = 0;
            }
        }
        dropped
    }

    /// Drop partial messages on `port` immediately
    pub fn on_timeout(&mut self, port: MidiPort) -> bool {
        let mut dropped = false;
        for slot in self.slots.iter_mut() {
            if slot.parser.on_timeout(port) {
                slot.idle_ms = 0;
                dropped = true;
            }
        }
        dropped
    }

    pub fn session(&self) -> &RemoteSession {
        &self.session
    }

    pub fn parsers(&self) -> impl Iterator<Item = &SysexParser> {
        self.slots.iter().map(|s| &s.parser)
    }
}
