//! Configuration type definitions
//!
//! Sign configuration is compiled into the firmware; these types exist so
//! the firmware and the host tests share one set of defaults.

/// What to watch and how to ask for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignConfig {
    /// Transit feed station identifier
    pub station: &'static str,
    /// Weather feed city query
    pub city: &'static str,
    /// Weather API key; `None` degrades the weather line to a placeholder
    pub weather_key: Option<&'static str>,
    /// Arrivals at or under this many minutes out are not shown
    pub min_minutes: i32,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            station: "A31",
            city: "New York,US",
            weather_key: None,
            min_minutes: 5,
        }
    }
}

/// Refresh cadences and the bounded session lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CadenceConfig {
    /// Weather refresh period (ms)
    pub weather_period_ms: u64,
    /// Total active-session cap (ms); reaching it ends the session
    pub session_cap_ms: u64,
    /// Fixed delay before retrying a failed cycle (ms)
    pub retry_backoff_ms: u64,
    /// Scroll ticks between schedule refreshes
    pub ticks_per_cycle: u16,
    /// Sleep between scroll ticks (ms)
    pub tick_interval_ms: u32,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            weather_period_ms: 600_000,
            session_cap_ms: 1_200_000,
            retry_backoff_ms: 10_000,
            ticks_per_cycle: 600,
            tick_interval_ms: 100,
        }
    }
}
