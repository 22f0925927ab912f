//! LCD character buffer
//!
//! A two line character display addressed as one linear buffer: line 1
//! starts at 0x00, line 2 at 0x40. Positions in the gap between the end of
//! a line and the start of the next are outside the display and writes to
//! them are dropped, as on the real controller.

use midibox_protocol::target::{DisplayTarget, LINE_STRIDE};

/// Number of character lines
pub const LCD_LINES: usize = 2;

/// Characters per line
pub const LCD_COLUMNS: usize = 40;

/// Character buffer backing the LCD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdBuffer {
    lines: [[u8; LCD_COLUMNS]; LCD_LINES],
    cursor: u8,
    charset: u8,
    dirty: bool,
}

impl Default for LcdBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LcdBuffer {
    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            lines: [[b' '; LCD_COLUMNS]; LCD_LINES],
            cursor: 0,
            charset: 0,
            dirty: true,
        }
    }

    /// Linear cursor position
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Characters of line `row`
    pub fn line(&self, row: usize) -> Option<&[u8; LCD_COLUMNS]> {
        self.lines.get(row)
    }

    /// Character at linear position `pos`
    pub fn char_at(&self, pos: u8) -> Option<u8> {
        let (row, col) = Self::locate(pos)?;
        Some(self.lines[row][col])
    }

    /// Special character set selected for the display
    pub fn charset(&self) -> u8 {
        self.charset
    }

    /// Return and clear the redraw flag
    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn locate(pos: u8) -> Option<(usize, usize)> {
        let row = (pos / LINE_STRIDE) as usize;
        let col = (pos % LINE_STRIDE) as usize;
        (row < LCD_LINES && col < LCD_COLUMNS).then_some((row, col))
    }
}

impl DisplayTarget for LcdBuffer {
    fn set_cursor(&mut self, pos: u8) {
        self.cursor = pos;
    }

    fn write_char(&mut self, c: u8) {
        if let Some((row, col)) = Self::locate(self.cursor) {
            self.lines[row][col] = c;
        }
        self.cursor = self.cursor.saturating_add(1);
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }

    fn set_special_charset(&mut self, charset: u8) {
        if self.charset != charset {
            self.charset = charset;
            self.dirty = true;
        }
    }

    fn clear(&mut self) {
        self.lines = [[b' '; LCD_COLUMNS]; LCD_LINES];
        self.cursor = 0;
        self.dirty = true;
    }
}
