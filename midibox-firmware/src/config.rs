//! Configuration persistence
//!
//! The SysEx configuration lives in the last flash sector as postcard
//! bytes. An erased or corrupt sector falls back to defaults.

use defmt::*;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

use midibox_core::config::MAX_ENCODED_SIZE;
use midibox_core::SysexConfig;

/// Flash size on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the config sector, matches CONFIG in memory.x
pub const CONFIG_OFFSET: u32 = (FLASH_SIZE - 4096) as u32;

/// Load the SysEx configuration from flash
pub fn load_sysex_config(flash: Peri<'static, FLASH>) -> SysexConfig {
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    let mut buf = [0u8; MAX_ENCODED_SIZE];

    if let Err(e) = flash.blocking_read(CONFIG_OFFSET, &mut buf) {
        warn!("Config read failed: {:?}", e);
        return SysexConfig::default();
    }

    let config = SysexConfig::load_or_default(&buf);
    info!(
        "SysEx config: device={=u8:#x}, mixer={}, sequencer={}, mode={}, timeout={}ms",
        config.device_id,
        config.mixer,
        config.sequencer,
        config.remote_mode,
        config.timeout_ms
    );
    config
}
