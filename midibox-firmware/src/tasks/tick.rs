//! Tick task for message timeouts

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::shared::SharedState;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 10;

/// Advances the router's idle timers
#[embassy_executor::task]
pub async fn tick_task(shared: &'static SharedState) {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        let dropped = shared.lock(|cell| cell.borrow_mut().router.tick(TICK_INTERVAL_MS));
        if dropped > 0 {
            debug!("{} partial SysEx message(s) timed out", dropped);
        }
    }
}
