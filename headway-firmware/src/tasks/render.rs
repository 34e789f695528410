//! Panel scan task (core 1)
//!
//! Loops forever refreshing the panel from the shared framebuffer. Runs
//! alone on core 1 so the session task's blocking fetches and sleeps on
//! core 0 never interrupt the scan.

use defmt::*;

use crate::display::hub75::{scan_frame, Hub75Pins};

/// Continuous panel refresh
#[embassy_executor::task]
pub async fn render_task(mut pins: Hub75Pins) {
    info!("Render task started on core 1");

    loop {
        scan_frame(&mut pins).await;
    }
}
