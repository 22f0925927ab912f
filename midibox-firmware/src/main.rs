//! MIDIbox - SysEx Control Surface Firmware
//!
//! Main firmware binary for RP2040-based MIDIbox controllers. Two serial
//! MIDI ports are served by the mixer and sequencer SysEx protocols.
//! Unclaimed bytes are left to the general MIDI path, which is not
//! implemented here; they are only trace-logged.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{self, BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use midibox_core::{ControlSurface, SysexRouter};
use midibox_hal::uart::{DataBits, Parity, StopBits};
use midibox_hal::{MidiPort, MidiUartConfig};

use crate::channels::MIDI_OUT;
use crate::shared::{Shared, SharedState};

mod channels;
mod config;
mod shared;
mod tasks;
mod transport;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

const UART_BUF_SIZE: usize = 256;

// Static cells for UART buffers (must live forever)
static TX_BUF0: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF0: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static TX_BUF1: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF1: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();

static SHARED: StaticCell<SharedState> = StaticCell::new();

const MIDI_A: MidiPort = MidiPort::Uart(0);
const MIDI_B: MidiPort = MidiPort::Uart(1);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("MIDIbox firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let sysex_config = config::load_sysex_config(p.FLASH);

    let router = match SysexRouter::from_config(&sysex_config, &[MIDI_A, MIDI_B]) {
        Ok(router) => router,
        Err(e) => {
            error!("Router setup failed: {:?}, serving defaults", e);
            SysexRouter::from_config(&Default::default(), &[MIDI_A, MIDI_B])
                .unwrap_or_else(|_| SysexRouter::new(sysex_config.device_id))
        }
    };
    let shared: &'static SharedState = SHARED.init(Mutex::new(RefCell::new(Shared {
        router,
        surface: ControlSurface::new(),
    })));

    // Pin assignments are board-specific (Pico: UART0 GPIO0/1, UART1 GPIO4/5)
    let midi_config = uart_config(&MidiUartConfig::default());

    let uart0 = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, midi_config);
    let uart0 = uart0.into_buffered(Irqs, TX_BUF0.init([0u8; UART_BUF_SIZE]), RX_BUF0.init([0u8; UART_BUF_SIZE]));
    let (tx0, rx0) = uart0.split();

    let uart1 = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config(&MidiUartConfig::default()));
    let uart1 = uart1.into_buffered(Irqs, TX_BUF1.init([0u8; UART_BUF_SIZE]), RX_BUF1.init([0u8; UART_BUF_SIZE]));
    let (tx1, rx1) = uart1.split();

    info!("MIDI UARTs initialized at {} baud", midibox_hal::MIDI_BAUDRATE);

    spawner.spawn(unwrap!(tasks::midi_rx_task(rx0, MIDI_A, shared)));
    spawner.spawn(unwrap!(tasks::midi_rx_task(rx1, MIDI_B, shared)));
    spawner.spawn(unwrap!(tasks::midi_tx_task(tx0, &MIDI_OUT[0])));
    spawner.spawn(unwrap!(tasks::midi_tx_task(tx1, &MIDI_OUT[1])));
    spawner.spawn(unwrap!(tasks::tick_task(shared)));
    spawner.spawn(unwrap!(tasks::surface_task(shared)));

    info!("All tasks spawned");
}

/// Translate the link settings into the embassy UART config
fn uart_config(config: &MidiUartConfig) -> UartConfig {
    let mut cfg = UartConfig::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}
