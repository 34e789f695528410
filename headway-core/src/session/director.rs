//! Cycle director
//!
//! All loop-global state of the original design - refresh timestamps,
//! remaining ticks, backoff deadlines, the session cap - lives in this
//! explicit context object instead of module-level globals. The loop asks
//! it what to do next against an injected monotonic clock, which makes the
//! whole cadence testable with simulated time.
//!
//! Ordering per poll matches the production loop: finish the current tick
//! budget first, then check the session cap, then any pending backoff,
//! then the weather cadence, and otherwise refresh the schedule.

use crate::config::CadenceConfig;

use super::machine::{SessionEvent, SessionState};

/// What the loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Fetch weather and report back via `weather_refreshed`
    FetchWeather,
    /// Fetch time + arrivals, rebuild content; report via
    /// `schedule_refreshed` or `cycle_failed`
    FetchSchedule,
    /// Advance both scroll lines one pixel, present, sleep one tick
    Tick,
    /// Sleep out a retry backoff
    Wait { ms: u32 },
    /// Cap reached: blank the display, zero intensity. Emitted once.
    EnterDormant,
    /// Terminal idle; nothing further will ever be asked
    Dormant,
}

/// Decides the next step of the session loop
#[derive(Debug, Clone)]
pub struct Director {
    cadence: CadenceConfig,
    state: SessionState,
    started_at_ms: Option<u64>,
    last_weather_ms: Option<u64>,
    backoff_until_ms: Option<u64>,
    ticks_remaining: u16,
    retries: u32,
}

impl Director {
    /// Create a director that has not started its session yet
    ///
    /// The session clock starts at the first `next_action` poll, not at
    /// construction.
    pub fn new(cadence: CadenceConfig) -> Self {
        Self {
            cadence,
            state: SessionState::Active,
            started_at_ms: None,
            last_weather_ms: None,
            backoff_until_ms: None,
            ticks_remaining: 0,
            retries: 0,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// How many failed cycles have been retried
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Decide what the loop should do now
    pub fn next_action(&mut self, now_ms: u64) -> Action {
        if self.state.is_terminal() {
            return Action::Dormant;
        }

        let started_at = *self.started_at_ms.get_or_insert(now_ms);

        // Finish the tick budget of the current cycle first; the cap is
        // only checked between cycles.
        if self.ticks_remaining > 0 {
            return Action::Tick;
        }

        if now_ms.saturating_sub(started_at) >= self.cadence.session_cap_ms {
            self.state = self.state.transition(SessionEvent::CapReached);
            return Action::EnterDormant;
        }

        if let Some(until) = self.backoff_until_ms {
            if now_ms < until {
                return Action::Wait {
                    ms: (until - now_ms) as u32,
                };
            }
            self.backoff_until_ms = None;
        }

        let weather_due = match self.last_weather_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cadence.weather_period_ms,
        };
        if weather_due {
            return Action::FetchWeather;
        }

        Action::FetchSchedule
    }

    /// The weather snapshot was refreshed (or replaced by a placeholder)
    pub fn weather_refreshed(&mut self, now_ms: u64) {
        self.last_weather_ms = Some(now_ms);
    }

    /// Schedule and scroll content were rebuilt; arm the tick budget
    pub fn schedule_refreshed(&mut self) {
        self.ticks_remaining = self.cadence.ticks_per_cycle;
    }

    /// One scroll tick was performed
    pub fn ticked(&mut self) {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }

    /// The cycle failed on a transport fault; back off, then retry it
    pub fn cycle_failed(&mut self, now_ms: u64) {
        self.retries = self.retries.wrapping_add(1);
        self.ticks_remaining = 0;
        self.backoff_until_ms = Some(now_ms + self.cadence.retry_backoff_ms);
    }
}
