//! Device header matching
//!
//! Each protocol variant is recognised by a fixed header prefix. The
//! matcher compares incoming bytes one at a time and keeps its position
//! across calls, so headers may arrive split over any number of reads.

use heapless::Vec;

use crate::command::{CommandEntry, MIXER_COMMANDS, SEQUENCER_COMMANDS};
use crate::frame::MAX_HEADER_SIZE;

/// Mixer surface header (motormix compatible)
pub const MIXER_HEADER: [u8; 7] = [0xF0, 0x00, 0x01, 0x0F, 0x00, 0x11, 0x00];

/// Sequencer header, followed on the wire by the device ID byte
pub const SEQUENCER_HEADER: [u8; 5] = [0xF0, 0x00, 0x00, 0x7E, 0x4D];

/// A complete header as matched on input and prefixed to responses
pub type Header = Vec<u8, MAX_HEADER_SIZE>;

/// Protocol variant served by a parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// LCD text, rotary pointers and LED digits
    Mixer,
    /// Remote control sessions and ping
    Sequencer,
}

impl Variant {
    /// Whether the header ends with the configured device ID byte
    pub fn has_device_id(self) -> bool {
        matches!(self, Variant::Sequencer)
    }

    /// Build the header for this variant
    ///
    /// The device ID is masked to seven bits; it is ignored by variants
    /// without a device ID.
    pub fn header(self, device_id: u8) -> Header {
        let mut header = Header::new();
        // Both fixed headers are shorter than MAX_HEADER_SIZE
        match self {
            Variant::Mixer => {
                let _ = header.extend_from_slice(&MIXER_HEADER);
            }
            Variant::Sequencer => {
                let _ = header.extend_from_slice(&SEQUENCER_HEADER);
                let _ = header.push(device_id & 0x7F);
            }
        }
        header
    }

    /// Command table of this variant
    pub fn commands(self) -> &'static [CommandEntry] {
        match self {
            Variant::Mixer => &MIXER_COMMANDS,
            Variant::Sequencer => &SEQUENCER_COMMANDS,
        }
    }
}

/// Result of feeding one byte to the [`HeaderMatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Match {
    /// Byte does not continue the header
    NoMatch,
    /// Byte matched, more header bytes expected
    Matching,
    /// Byte completed the header
    HeaderComplete,
}

/// Byte-by-byte header matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaderMatcher {
    matched: u8,
    complete: bool,
}

impl HeaderMatcher {
    /// Create a matcher at the start of a header
    pub const fn new() -> Self {
        Self {
            matched: 0,
            complete: false,
        }
    }

    /// Number of header bytes matched so far
    pub fn matched(&self) -> u8 {
        self.matched
    }

    /// True once the full header has been seen
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Compare `byte` against the next expected header byte
    ///
    /// A mismatch restarts matching from the first header byte; the
    /// mismatching byte itself is not re-examined. Once the header is
    /// complete further bytes are not header bytes: they return
    /// [`Match::NoMatch`] and leave the matcher complete until [`reset`].
    ///
    /// [`reset`]: HeaderMatcher::reset
    pub fn feed(&mut self, header: &[u8], byte: u8) -> Match {
        if self.complete {
            return Match::NoMatch;
        }

        match header.get(self.matched as usize) {
            Some(&expected) if expected == byte => {
                self.matched += 1;
                if self.matched as usize == header.len() {
                    self.complete = true;
                    Match::HeaderComplete
                } else {
                    Match::Matching
                }
            }
            _ => {
                self.reset();
                Match::NoMatch
            }
        }
    }
}
