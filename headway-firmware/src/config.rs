//! Compiled-in sign configuration
//!
//! Station, city, and credentials are build-time constants; edit and
//! reflash to retarget the sign. The weather key ships as `None` so a
//! public build degrades to the "No API Key" placeholder instead of
//! leaking a credential.

use headway_core::config::{CadenceConfig, SignConfig};

/// What this sign watches
pub const SIGN: SignConfig = SignConfig {
    station: "A31",
    city: "New York,US",
    weather_key: None,
    min_minutes: 5,
};

/// Refresh cadences and the 20-minute session cap
pub const CADENCE: CadenceConfig = CadenceConfig {
    weather_period_ms: 600_000,
    session_cap_ms: 1_200_000,
    retry_backoff_ms: 10_000,
    ticks_per_cycle: 600,
    tick_interval_ms: 100,
};
