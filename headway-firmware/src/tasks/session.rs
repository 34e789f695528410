//! Session task (core 0)
//!
//! Drives the core engine's single cooperative loop: splash, then
//! fetch/compose/scroll cycles until the session cap, then dormant idle
//! until reset. The engine itself is synchronous; this task only adds
//! logging and the terminal park.

use core::cell::RefCell;

use defmt::*;
use embassy_time::Timer;

use headway_core::session::{Action, CycleRunner};

use crate::config;
use crate::display::MatrixSign;
use crate::mono::BoardClock;
use crate::net::{LinkClient, LinkHandle};

/// The whole active session, splash to dormancy
#[embassy_executor::task]
pub async fn session_task(link: LinkClient) {
    info!("Session task started");

    let mut sign = MatrixSign::new();
    sign.splash();
    Timer::after_secs(2).await;

    let link = RefCell::new(link);
    let mut runner = CycleRunner::new(
        LinkHandle::new(&link),
        LinkHandle::new(&link),
        LinkHandle::new(&link),
        sign,
        BoardClock,
        config::SIGN,
        config::CADENCE,
    );

    let mut retries_seen = 0;
    loop {
        match runner.step() {
            Action::FetchWeather => {
                if let Some(snapshot) = runner.weather() {
                    info!(
                        "Weather: {=str}, {}F",
                        snapshot.description.as_str(),
                        snapshot.temp_f
                    );
                }
            }
            Action::FetchSchedule => {
                if runner.retries() > retries_seen {
                    retries_seen = runner.retries();
                    warn!(
                        "Cycle fetch failed (retry {}), backing off",
                        retries_seen
                    );
                } else {
                    debug!(
                        "Schedule refreshed: up {}px, down {}px, {} records dropped, {} clock fallbacks",
                        runner.up_content().width,
                        runner.down_content().width,
                        runner.dropped_last_cycle(),
                        runner.clock().fallback_count()
                    );
                }
            }
            Action::EnterDormant => {
                info!("Session cap reached - display off, press reset to restart");
            }
            Action::Dormant => break,
            Action::Tick | Action::Wait { .. } => {}
        }
    }

    // Terminal idle until reset; nothing is polled or drawn again
    loop {
        Timer::after_secs(3600).await;
    }
}
