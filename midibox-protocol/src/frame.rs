//! Frame constants and response encoding
//!
//! Outgoing frame format:
//! - HEADER (5-7 bytes): variant header, starting with 0xF0
//! - DEVICE ID (1 byte): sequencer variant only, part of the header prefix
//! - PAYLOAD (0-16 bytes): data bytes, all below 0x80
//! - EOX (1 byte): 0xF7

use heapless::Vec;

/// Start of exclusive
pub const SYSEX_START: u8 = 0xF0;

/// End of exclusive, the message terminator
pub const SYSEX_END: u8 = 0xF7;

/// Maximum payload size of an outgoing frame
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// Maximum header size including the device ID byte
pub const MAX_HEADER_SIZE: usize = 8;

/// Maximum complete frame size (HEADER + PAYLOAD + EOX)
pub const MAX_FRAME_SIZE: usize = MAX_HEADER_SIZE + MAX_PAYLOAD_SIZE + 1;

/// An encoded outgoing frame
pub type FrameBuf = Vec<u8, MAX_FRAME_SIZE>;

/// Returns true for MIDI status bytes (0x80..=0xFF)
pub fn is_status(byte: u8) -> bool {
    byte & 0x80 != 0
}

/// Returns true for MIDI realtime bytes (0xF8..=0xFF)
pub fn is_realtime(byte: u8) -> bool {
    byte & 0xF8 == 0xF8
}

/// Acknowledge codes, first payload byte of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AckCode {
    /// Negative acknowledge
    Disack = 0x0E,
    /// Positive acknowledge
    Ack = 0x0F,
}

impl AckCode {
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// DISACK reasons, second payload byte of a negative acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisackReason {
    /// Message ended before all expected fields arrived
    LessBytesThanExpected = 0x01,
    /// Message carried more bytes than the command takes
    MoreBytesThanExpected = 0x02,
    /// Checksum mismatch
    WrongChecksum = 0x03,
    /// Requested bank or resource is not available
    BankNotAvailable = 0x0A,
    /// Command ID is not known to this device
    InvalidCommand = 0x0C,
}

impl DisackReason {
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Errors that can occur while emitting a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Header prefix exceeds [`MAX_HEADER_SIZE`]
    HeaderTooLarge,
    /// The transport refused the frame
    Transport,
}

/// Build a complete frame from a header prefix and a payload
pub fn encode_frame(prefix: &[u8], payload: &[u8]) -> Result<FrameBuf, ResponseError> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(ResponseError::PayloadTooLarge);
    }
    if prefix.len() > MAX_HEADER_SIZE {
        return Err(ResponseError::HeaderTooLarge);
    }

    let mut frame = FrameBuf::new();
    frame
        .extend_from_slice(prefix)
        .map_err(|_| ResponseError::HeaderTooLarge)?;
    frame
        .extend_from_slice(payload)
        .map_err(|_| ResponseError::PayloadTooLarge)?;
    frame
        .push(SYSEX_END)
        .map_err(|_| ResponseError::PayloadTooLarge)?;

    Ok(frame)
}
