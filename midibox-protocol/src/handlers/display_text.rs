//! Write LCD text
//!
//! Data: one cursor byte, then characters. The cursor byte addresses a two
//! line display: values below 40 select a column of line 1, values from 40
//! on select line 2, which starts at 0x40 in the linear buffer.

use midibox_hal::SysexTx;

use super::{CommandHandler, Context};
use crate::command::Lifecycle;
use crate::target::{Surface, LINE_STRIDE};

/// Characters per LCD line on the wire
pub const LINE_LENGTH: u8 = 40;

/// Map the cursor byte to a linear buffer position
pub fn cursor_position(value: u8) -> u8 {
    if value < LINE_LENGTH {
        value
    } else {
        value - LINE_LENGTH + LINE_STRIDE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteDisplayText {
    /// Position of the next character, `None` until the cursor byte arrived
    cursor: Option<u8>,
    /// Cursor ran past the last buffer position; further characters are dropped
    exhausted: bool,
}

impl CommandHandler for WriteDisplayText {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    ) {
        if lifecycle != Lifecycle::Cont {
            return;
        }

        match self.cursor {
            None => {
                let pos = cursor_position(byte);
                cx.surface.set_cursor(pos);
                self.cursor = Some(pos);
            }
            Some(_) if self.exhausted => {}
            Some(pos) => {
                // Other ports may move the cursor between our bytes
                cx.surface.set_cursor(pos);
                cx.surface.write_char(byte);
                cx.surface.request_redraw();
                match pos.checked_add(1) {
                    Some(next) => self.cursor = Some(next),
                    None => self.exhausted = true,
                }
            }
        }
    }
}
