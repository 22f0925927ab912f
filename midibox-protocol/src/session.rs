//! Remote control session
//!
//! Only one port at a time may remote-control the device. The session is
//! shared by all parsers of a device and passed to every feed call, so the
//! owner check sees the other ports' state without any global.

use midibox_hal::MidiPort;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configured remote mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RemoteMode {
    /// Peers may open and close sessions with ON/OFF
    #[default]
    Auto,
    /// Role fixed by local configuration: this device controls a peer
    Server,
    /// Role fixed by local configuration: this device is controlled
    Client,
}

impl RemoteMode {
    /// Whether ON/OFF requests from a peer are honoured
    pub fn accepts_requests(self) -> bool {
        matches!(self, RemoteMode::Auto)
    }
}

/// Remote sub-commands, echoed as the ACK/DISACK argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RemoteCommand {
    /// Close the session
    Off = 0x00,
    /// Open a session for the sending port
    On = 0x01,
    /// Write characters at an X/Y position
    Lcd = 0x02,
    /// Select a special character set
    Charset = 0x03,
    /// Request not allowed in the current mode or session state
    Disabled = 0x7D,
    /// Session held by another port
    Allocated = 0x7E,
    /// Unknown or missing sub-command
    #[default]
    Error = 0x7F,
}

impl RemoteCommand {
    /// Parse a requested sub-command; only OFF/ON/LCD/CHARSET are requests
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(RemoteCommand::Off),
            0x01 => Some(RemoteCommand::On),
            0x02 => Some(RemoteCommand::Lcd),
            0x03 => Some(RemoteCommand::Charset),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Device-wide remote session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteSession {
    mode: RemoteMode,
    owner: Option<MidiPort>,
}

impl RemoteSession {
    pub const fn new(mode: RemoteMode) -> Self {
        Self { mode, owner: None }
    }

    pub fn mode(&self) -> RemoteMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RemoteMode) {
        self.mode = mode;
    }

    /// Port currently holding the session
    pub fn owner(&self) -> Option<MidiPort> {
        self.owner
    }

    /// True if `port` holds the session
    pub fn is_held_by(&self, port: MidiPort) -> bool {
        self.owner == Some(port)
    }

    /// True if a port other than `port` holds the session
    pub fn is_held_by_other(&self, port: MidiPort) -> bool {
        matches!(self.owner, Some(owner) if owner != port)
    }

    /// Grant the session to `port`
    pub fn open(&mut self, port: MidiPort) {
        self.owner = Some(port);
    }

    pub fn close(&mut self) {
        self.owner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership() {
        let a = MidiPort::Uart(0);
        let b = MidiPort::Uart(1);
        let mut session = RemoteSession::new(RemoteMode::Auto);

        assert_eq!(session.owner(), None);
        assert!(!session.is_held_by_other(a));

        session.open(a);
        assert!(session.is_held_by(a));
        assert!(!session.is_held_by_other(a));
        assert!(session.is_held_by_other(b));

        session.close();
        assert_eq!(session.owner(), None);
    }

    #[test]
    fn test_only_auto_accepts_requests() {
        assert!(RemoteMode::Auto.accepts_requests());
        assert!(!RemoteMode::Server.accepts_requests());
        assert!(!RemoteMode::Client.accepts_requests());
    }

    #[test]
    fn test_command_bytes() {
        assert_eq!(RemoteCommand::from_byte(0x00), Some(RemoteCommand::Off));
        assert_eq!(RemoteCommand::from_byte(0x03), Some(RemoteCommand::Charset));
        assert_eq!(RemoteCommand::from_byte(0x04), None);
        assert_eq!(RemoteCommand::from_byte(0x7E), None);
        assert_eq!(RemoteCommand::Allocated.to_byte(), 0x7E);
        assert_eq!(RemoteCommand::default(), RemoteCommand::Error);
    }
}
