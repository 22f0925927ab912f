//! Write rotary pointer values
//!
//! Data: pointer display type, pointer index, then values. Every value byte
//! after the index updates the same pointer; the last one wins.

use midibox_hal::SysexTx;

use super::{CommandHandler, Context};
use crate::command::Lifecycle;
use crate::target::Surface;

/// Number of rotary pointers
pub const POINTER_COUNT: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteRotaryValue {
    pointer_type: Option<u8>,
    index: Option<u8>,
}

impl CommandHandler for WriteRotaryValue {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    ) {
        if lifecycle != Lifecycle::Cont {
            return;
        }

        if self.pointer_type.is_none() {
            self.pointer_type = Some(byte);
            cx.surface.set_pointer_type(byte);
        } else if let Some(index) = self.index {
            cx.surface.set_pointer_value(index, byte);
        } else {
            self.index = Some(byte & (POINTER_COUNT - 1));
        }
    }
}
