//! Recording targets and transport for tests

use heapless::Vec;
use midibox_hal::{MidiPort, SysexTx};

use crate::frame::FrameBuf;
use crate::target::{DisplayTarget, ValueTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Char { pos: u8, c: u8 },
    Charset(u8),
    Clear,
    PointerType(u8),
    PointerValue { index: u8, value: u8 },
    Digit { slot: u8, pattern: u8 },
}

#[derive(Debug, Default)]
pub struct MockSurface {
    pub cursor: u8,
    pub redraw: bool,
    pub calls: Vec<Call, 128>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: Call) {
        // Long random streams may overflow the log; keep the first entries
        let _ = self.calls.push(call);
    }

    pub fn chars(&self) -> Vec<(u8, u8), 128> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                Call::Char { pos, c } => Some((pos, c)),
                _ => None,
            })
            .collect()
    }

    pub fn digits(&self) -> Vec<(u8, u8), 128> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                Call::Digit { slot, pattern } => Some((slot, pattern)),
                _ => None,
            })
            .collect()
    }
}

impl DisplayTarget for MockSurface {
    fn set_cursor(&mut self, pos: u8) {
        self.cursor = pos;
    }

    fn write_char(&mut self, c: u8) {
        let pos = self.cursor;
        self.record(Call::Char { pos, c });
        self.cursor = self.cursor.saturating_add(1);
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    fn set_special_charset(&mut self, charset: u8) {
        self.record(Call::Charset(charset));
    }

    fn clear(&mut self) {
        self.record(Call::Clear);
    }
}

impl ValueTarget for MockSurface {
    fn set_pointer_type(&mut self, pointer_type: u8) {
        self.record(Call::PointerType(pointer_type));
    }

    fn set_pointer_value(&mut self, index: u8, value: u8) {
        self.record(Call::PointerValue { index, value });
    }

    fn set_digit(&mut self, slot: u8, pattern: u8) {
        self.record(Call::Digit { slot, pattern });
    }
}

#[derive(Debug, Default)]
pub struct MockTx {
    pub frames: Vec<(MidiPort, FrameBuf), 16>,
    fail: bool,
}

impl MockTx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            frames: Vec::new(),
            fail: true,
        }
    }

    /// Payload bytes (between header prefix and EOX) of frame `i`
    pub fn payload(&self, i: usize, prefix_len: usize) -> &[u8] {
        let frame = &self.frames[i].1;
        &frame[prefix_len..frame.len() - 1]
    }
}

impl SysexTx for MockTx {
    type Error = ();

    fn send_sysex(&mut self, port: MidiPort, frame: &[u8]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        let mut buf = FrameBuf::new();
        buf.extend_from_slice(frame).map_err(|_| ())?;
        self.frames.push((port, buf)).map_err(|_| ())
    }
}
