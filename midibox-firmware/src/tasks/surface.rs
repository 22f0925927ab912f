//! Surface refresh task
//!
//! Picks up LCD and value changes made by SysEx commands. The board has no
//! display driver yet, so changes are reported over the log.

use defmt::*;

use crate::channels::SURFACE_CHANGED;
use crate::shared::SharedState;

#[embassy_executor::task]
pub async fn surface_task(shared: &'static SharedState) {
    info!("Surface task started");

    loop {
        SURFACE_CHANGED.wait().await;

        shared.lock(|cell| {
            let mut shared = cell.borrow_mut();
            let surface = &mut shared.surface;

            if let Some(charset) = surface.values.charset_to_load() {
                debug!("Load pointer charset {}", charset);
            }
            if surface.values.take_changed() {
                debug!(
                    "Pointers {=[u8]} type {}",
                    &surface.values.pointers()[..],
                    surface.values.pointer_type()
                );
            }
            if surface.lcd.take_redraw() {
                for row in 0..midibox_core::lcd::LCD_LINES {
                    if let Some(line) = surface.lcd.line(row) {
                        debug!("LCD {}: {=[u8]:a}", row, &line[..]);
                    }
                }
            }
        });
    }
}
