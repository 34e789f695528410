//! Headway - LED matrix transit sign firmware
//!
//! Main firmware binary for RP2040-based signs: a 64x32 HUB75 panel and
//! an ESP32 Wi-Fi co-processor on a UART. Core 0 runs the session engine,
//! core 1 scans the panel.
//!
//! Named after the transit term "headway" - the interval between
//! consecutive trains, which is what the sign spends its life counting
//! down.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::uart::{Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::display::hub75::Hub75Pins;
use crate::net::LinkClient;

mod channels;
mod config;
mod display;
mod mono;
mod net;
mod tasks;

static CORE1_STACK: StaticCell<Stack<4096>> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Headway firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // HUB75 pin assignments follow the Interstate 75 layout
    let pins = Hub75Pins {
        r1: Output::new(p.PIN_0, Level::Low),
        g1: Output::new(p.PIN_1, Level::Low),
        b1: Output::new(p.PIN_2, Level::Low),
        r2: Output::new(p.PIN_3, Level::Low),
        g2: Output::new(p.PIN_4, Level::Low),
        b2: Output::new(p.PIN_5, Level::Low),
        addr_a: Output::new(p.PIN_6, Level::Low),
        addr_b: Output::new(p.PIN_7, Level::Low),
        addr_c: Output::new(p.PIN_10, Level::Low),
        addr_d: Output::new(p.PIN_11, Level::Low),
        clk: Output::new(p.PIN_12, Level::Low),
        lat: Output::new(p.PIN_13, Level::Low),
        oe: Output::new(p.PIN_14, Level::High), // active low: start dark
    };

    // Panel scan-out owns core 1 so fetches never stall it
    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let executor = EXECUTOR1.init(Executor::new());
        executor.run(|spawner| spawner.spawn(tasks::render::render_task(pins)).unwrap())
    });
    info!("Panel scanner running on core 1");

    // UART link to the Wi-Fi co-processor
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, uart_config);
    let link = LinkClient::new(uart);
    info!("Co-processor link initialized");

    spawner.spawn(tasks::session::session_task(link)).unwrap();
}
