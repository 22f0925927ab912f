//! Target traits
//!
//! Command handlers never own display or LED state. They drive whatever
//! implements these traits: the application's LCD buffer and value table
//! on the device, recording mocks in tests.

/// Distance between the first characters of two LCD lines in the
/// linear cursor address space
pub const LINE_STRIDE: u8 = 0x40;

/// Character display written by the protocol
pub trait DisplayTarget {
    /// Move the cursor to a linear position (line 2 starts at [`LINE_STRIDE`])
    fn set_cursor(&mut self, pos: u8);

    /// Write one character at the cursor and advance it
    fn write_char(&mut self, c: u8);

    /// Flag the display for redraw
    fn request_redraw(&mut self);

    /// Select a special character set
    fn set_special_charset(&mut self, charset: u8);

    /// Blank the whole display
    fn clear(&mut self);

    /// Move the cursor to column `x` of line `y`
    ///
    /// Coordinates past the end of the buffer clamp to its last position.
    fn set_cursor_xy(&mut self, x: u8, y: u8) {
        self.set_cursor(y.saturating_mul(LINE_STRIDE).saturating_add(x));
    }
}

/// Rotary pointer and LED digit values written by the protocol
pub trait ValueTarget {
    /// Select the pointer display type
    fn set_pointer_type(&mut self, pointer_type: u8);

    /// Set the value of pointer `index` (0-7)
    fn set_pointer_value(&mut self, index: u8, value: u8);

    /// Set the segment pattern of digit `slot` (0 or 1)
    fn set_digit(&mut self, slot: u8, pattern: u8);
}

/// Everything a command handler may touch
pub trait Surface: DisplayTarget + ValueTarget {}

// Blanket implementation
impl<T: DisplayTarget + ValueTarget> Surface for T {}
