//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod midi_rx;
pub mod midi_tx;
pub mod surface;
pub mod tick;

pub use midi_rx::midi_rx_task;
pub use midi_tx::midi_tx_task;
pub use surface::surface_task;
pub use tick::tick_task;
