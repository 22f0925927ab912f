//! Rotary pointer and LED digit values
//!
//! The pointer display type decides which special characters the LCD must
//! hold to draw the pointers. The table remembers which type's characters
//! were last uploaded and forgets it whenever the type changes.

use midibox_protocol::target::ValueTarget;

/// Number of rotary pointers
pub const POINTER_COUNT: usize = 8;

/// Number of LED digits
pub const DIGIT_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueTable {
    pointer_type: u8,
    pointers: [u8; POINTER_COUNT],
    digits: [u8; DIGIT_COUNT],
    /// Pointer type whose special characters are loaded
    loaded_charset: Option<u8>,
    dirty: bool,
}

impl ValueTable {
    pub const fn new() -> Self {
        Self {
            pointer_type: 0,
            pointers: [0; POINTER_COUNT],
            digits: [0; DIGIT_COUNT],
            loaded_charset: None,
            dirty: false,
        }
    }

    pub fn pointer_type(&self) -> u8 {
        self.pointer_type
    }

    pub fn pointer(&self, index: usize) -> Option<u8> {
        self.pointers.get(index).copied()
    }

    pub fn pointers(&self) -> &[u8; POINTER_COUNT] {
        &self.pointers
    }

    /// Segment pattern of digit `slot`
    pub fn digit(&self, slot: usize) -> Option<u8> {
        self.digits.get(slot).copied()
    }

    /// Pointer type whose special characters need uploading, if any
    ///
    /// Marks them as loaded; the caller is expected to upload right away.
    pub fn charset_to_load(&mut self) -> Option<u8> {
        if self.loaded_charset == Some(self.pointer_type) {
            return None;
        }
        self.loaded_charset = Some(self.pointer_type);
        Some(self.pointer_type)
    }

    pub fn is_changed(&self) -> bool {
        self.dirty
    }

    /// Return and clear the changed flag
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl ValueTarget for ValueTable {
    fn set_pointer_type(&mut self, pointer_type: u8) {
        if pointer_type != self.pointer_type {
            self.loaded_charset = None;
        }
        self.pointer_type = pointer_type;
        self.dirty = true;
    }

    fn set_pointer_value(&mut self, index: u8, value: u8) {
        if let Some(slot) = self.pointers.get_mut(index as usize) {
            *slot = value;
            self.dirty = true;
        }
    }

    fn set_digit(&mut self, slot: u8, pattern: u8) {
        if let Some(digit) = self.digits.get_mut(slot as usize) {
            *digit = pattern;
            self.dirty = true;
        }
    }
}
