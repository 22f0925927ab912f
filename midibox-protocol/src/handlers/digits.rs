//! Write LED digits
//!
//! Data bytes come in pairs: the first carries the upper segment bits and
//! the dot, the second the lower nibble. Pairs alternate between digit
//! slot 0 and slot 1.

use midibox_hal::SysexTx;

use super::{CommandHandler, Context};
use crate::command::Lifecycle;
use crate::target::Surface;

/// Dot flag in the input byte
const DOT_INPUT: u8 = 0x40;
/// Dot bit of the segment pattern
const DOT_SEGMENT: u8 = 0x80;

/// Upper half of a digit pattern from the first byte of a pair
pub fn pattern_high(byte: u8) -> u8 {
    let mut pattern = (byte & 0x07) << 4;
    if byte & DOT_INPUT != 0 {
        pattern |= DOT_SEGMENT;
    }
    pattern
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteDigits {
    counter: u8,
    pattern: u8,
}

impl CommandHandler for WriteDigits {
    fn handle<S: Surface, T: SysexTx>(
        &mut self,
        lifecycle: Lifecycle,
        byte: u8,
        cx: &mut Context<'_, S, T>,
    ) {
        match lifecycle {
            Lifecycle::Begin => {
                self.counter = 0;
                self.pattern = 0;
            }
            Lifecycle::Cont => {
                let step = self.counter % 4;
                self.counter = self.counter.wrapping_add(1);

                match step {
                    0 | 2 => self.pattern = pattern_high(byte),
                    _ => {
                        let slot = step / 2;
                        cx.surface.set_digit(slot, self.pattern | (byte & 0x0F));
                    }
                }
            }
            Lifecycle::End => {}
        }
    }
}
