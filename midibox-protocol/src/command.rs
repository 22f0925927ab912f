//! Command IDs and dispatch tables
//!
//! The byte following the header selects a handler. Each variant owns a
//! small table mapping command IDs to handler kinds; the dispatcher only
//! looks IDs up and never matches on raw values itself.

/// Lifecycle signal passed to a command handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// The command byte itself
    Begin,
    /// A data byte
    Cont,
    /// The terminating status byte (0xF7 or an aborting status)
    End,
}

/// Command handler kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Write characters into the LCD buffer
    WriteDisplayText,
    /// Set pointer type, index and value of a rotary ring
    WriteRotaryValue,
    /// Set the two LED digits
    WriteDigits,
    /// Remote control session sub-protocol
    RemoteControl,
    /// Loop-safe ping
    Ping,
}

/// One row of a command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub id: u8,
    pub kind: CommandKind,
}

// Command IDs: mixer
pub const CMD_WRITE_DISPLAY_TEXT: u8 = 0x10;
pub const CMD_WRITE_ROTARY_VALUE: u8 = 0x11;
pub const CMD_WRITE_DIGITS: u8 = 0x12;

// Command IDs: sequencer
pub const CMD_REMOTE_CONTROL: u8 = 0x09;
pub const CMD_PING: u8 = 0x0F;

pub static MIXER_COMMANDS: [CommandEntry; 3] = [
    CommandEntry {
        id: CMD_WRITE_DISPLAY_TEXT,
        kind: CommandKind::WriteDisplayText,
    },
    CommandEntry {
        id: CMD_WRITE_ROTARY_VALUE,
        kind: CommandKind::WriteRotaryValue,
    },
    CommandEntry {
        id: CMD_WRITE_DIGITS,
        kind: CommandKind::WriteDigits,
    },
];

pub static SEQUENCER_COMMANDS: [CommandEntry; 2] = [
    CommandEntry {
        id: CMD_REMOTE_CONTROL,
        kind: CommandKind::RemoteControl,
    },
    CommandEntry {
        id: CMD_PING,
        kind: CommandKind::Ping,
    },
];

/// Find the handler kind registered for `id`
pub fn lookup(table: &[CommandEntry], id: u8) -> Option<CommandKind> {
    table.iter().find(|entry| entry.id == id).map(|entry| entry.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_mixer() {
        assert_eq!(
            lookup(&MIXER_COMMANDS, 0x10),
            Some(CommandKind::WriteDisplayText)
        );
        assert_eq!(
            lookup(&MIXER_COMMANDS, 0x11),
            Some(CommandKind::WriteRotaryValue)
        );
        assert_eq!(lookup(&MIXER_COMMANDS, 0x12), Some(CommandKind::WriteDigits));
        assert_eq!(lookup(&MIXER_COMMANDS, 0x09), None);
    }

    #[test]
    fn test_lookup_sequencer() {
        assert_eq!(
            lookup(&SEQUENCER_COMMANDS, 0x09),
            Some(CommandKind::RemoteControl)
        );
        assert_eq!(lookup(&SEQUENCER_COMMANDS, 0x0F), Some(CommandKind::Ping));
        assert_eq!(lookup(&SEQUENCER_COMMANDS, 0x10), None);
    }

    #[test]
    fn test_ids_unique_per_table() {
        for table in [&MIXER_COMMANDS[..], &SEQUENCER_COMMANDS[..]] {
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert_ne!(a.id, b.id);
                }
            }
        }
    }
}
