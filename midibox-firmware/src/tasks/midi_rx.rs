//! MIDI UART receive task
//!
//! Feeds every received byte through the SysEx router. Bytes the router
//! does not claim belong to the regular MIDI path.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use midibox_hal::MidiPort;

use crate::channels::SURFACE_CHANGED;
use crate::shared::SharedState;
use crate::transport::QueueTx;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

#[embassy_executor::task(pool_size = 2)]
pub async fn midi_rx_task(mut rx: BufferedUartRx, port: MidiPort, shared: &'static SharedState) {
    info!("MIDI RX task started on {}", port);

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX {}: {} bytes", port, n);
                let changed = shared.lock(|cell| {
                    let mut shared = cell.borrow_mut();
                    let shared = &mut *shared;
                    for &byte in &buf[..n] {
                        let claimed = shared
                            .router
                            .receive(port, byte, &mut shared.surface, &mut QueueTx);
                        if !claimed {
                            trace!("MIDI {}: {=u8:#x}", port, byte);
                        }
                    }
                    shared.surface.lcd.needs_redraw() || shared.surface.values.is_changed()
                });

                if changed {
                    SURFACE_CHANGED.signal(());
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error on {}: {:?}", port, e);
            }
        }
    }
}
