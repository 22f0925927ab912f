//! Control surface state written by the SysEx protocol

use midibox_protocol::target::{DisplayTarget, ValueTarget};

use crate::lcd::LcdBuffer;
use crate::values::ValueTable;

/// LCD and value table of one controller
#[derive(Debug, Clone, Default)]
pub struct ControlSurface {
    pub lcd: LcdBuffer,
    pub values: ValueTable,
}

impl ControlSurface {
    pub const fn new() -> Self {
        Self {
            lcd: LcdBuffer::new(),
            values: ValueTable::new(),
        }
    }
}

impl DisplayTarget for ControlSurface {
    fn set_cursor(&mut self, pos: u8) {
        self.lcd.set_cursor(pos);
    }

    fn write_char(&mut self, c: u8) {
        self.lcd.write_char(c);
    }

    fn request_redraw(&mut self) {
        self.lcd.request_redraw();
    }

    fn set_special_charset(&mut self, charset: u8) {
        self.lcd.set_special_charset(charset);
    }

    fn clear(&mut self) {
        self.lcd.clear();
    }
}

impl ValueTarget for ControlSurface {
    fn set_pointer_type(&mut self, pointer_type: u8) {
        self.values.set_pointer_type(pointer_type);
    }

    fn set_pointer_value(&mut self, index: u8, value: u8) {
        self.values.set_pointer_value(index, value);
    }

    fn set_digit(&mut self, slot: u8, pattern: u8) {
        self.values.set_digit(slot, pattern);
    }
}
