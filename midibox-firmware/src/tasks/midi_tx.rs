//! MIDI UART transmit task
//!
//! Drains the output queue of one port.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::FrameChannel;

#[embassy_executor::task(pool_size = 2)]
pub async fn midi_tx_task(mut tx: BufferedUartTx, queue: &'static FrameChannel) {
    info!("MIDI TX task started");

    loop {
        let frame = queue.receive().await;
        match tx.write_all(&frame).await {
            Ok(()) => trace!("TX: {} byte frame", frame.len()),
            Err(e) => warn!("Failed to send SysEx frame: {:?}", e),
        }
    }
}
