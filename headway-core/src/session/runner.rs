//! The session loop
//!
//! One cooperative, synchronous loop owns everything: collaborators,
//! canonical clock, cached weather, composed content, scroll geometry.
//! Each poll cycle rebuilds the schedule view from scratch and hands it to
//! a bounded tick loop that only advances scroll positions; nothing is
//! shared, so nothing is locked. Suspension happens only inside
//! [`Monotonic::sleep_ms`] and the blocking fetches.

use headway_feeds::TransitPayload;

use crate::clock::CanonicalClock;
use crate::config::{CadenceConfig, SignConfig};
use crate::schedule::{RouteTable, ScheduleBoard};
use crate::scroll::{LineContent, Scene, ScrollLine};
use crate::session::{Action, Director, SessionState};
use crate::traits::{ClockSource, FetchError, Monotonic, Sign, TransitFeed, WeatherFeed};
use crate::weather::WeatherSnapshot;

/// The complete sign engine
///
/// Generic over the collaborator traits so the whole session can run
/// against mocks and a fake clock on the host.
pub struct CycleRunner<C, T, W, S, M> {
    clock_source: C,
    transit: T,
    weather_feed: W,
    sign: S,
    mono: M,
    config: SignConfig,
    director: Director,
    clock: CanonicalClock,
    weather: Option<WeatherSnapshot>,
    up_content: LineContent,
    down_content: LineContent,
    up_line: ScrollLine,
    down_line: ScrollLine,
    tick_interval_ms: u32,
    dropped_last_cycle: u8,
}

impl<C, T, W, S, M> CycleRunner<C, T, W, S, M>
where
    C: ClockSource,
    T: TransitFeed,
    W: WeatherFeed,
    S: Sign,
    M: Monotonic,
{
    /// Assemble an engine from its collaborators
    pub fn new(
        clock_source: C,
        transit: T,
        weather_feed: W,
        sign: S,
        mono: M,
        config: SignConfig,
        cadence: CadenceConfig,
    ) -> Self {
        Self {
            clock_source,
            transit,
            weather_feed,
            sign,
            mono,
            config,
            director: Director::new(cadence),
            clock: CanonicalClock::new(),
            weather: None,
            up_content: LineContent::default(),
            down_content: LineContent::default(),
            up_line: ScrollLine::new(0),
            down_line: ScrollLine::new(0),
            tick_interval_ms: cadence.tick_interval_ms,
            dropped_last_cycle: 0,
        }
    }

    /// Run until the session cap puts the sign to sleep
    pub fn run(&mut self) {
        while self.step() != Action::Dormant {}
    }

    /// Perform one step of the loop and report which it was
    pub fn step(&mut self) -> Action {
        let now_ms = self.mono.now_ms();
        let action = self.director.next_action(now_ms);

        match action {
            Action::FetchWeather => self.refresh_weather(now_ms),
            Action::FetchSchedule => match self.refresh_schedule(now_ms) {
                Ok(()) => self.director.schedule_refreshed(),
                Err(_) => self.director.cycle_failed(now_ms),
            },
            Action::Tick => self.tick(now_ms),
            Action::Wait { ms } => self.mono.sleep_ms(ms),
            Action::EnterDormant => {
                let _ = self.sign.clear();
                self.sign.set_intensity(0);
            }
            Action::Dormant => {}
        }

        action
    }

    /// Refresh the weather snapshot, degrading instead of failing
    ///
    /// A failed or unusable fetch installs a placeholder and still stamps
    /// the refresh time, so a dead weather API is probed once per weather
    /// period rather than every cycle.
    fn refresh_weather(&mut self, now_ms: u64) {
        let snapshot = match self.config.weather_key {
            None => WeatherSnapshot::no_api_key(),
            Some(key) => match self.weather_feed.fetch_weather(self.config.city, key) {
                Ok(payload) => WeatherSnapshot::from_payload(&payload),
                Err(_) => WeatherSnapshot::unknown(),
            },
        };
        self.weather = Some(snapshot);
        self.director.weather_refreshed(now_ms);
    }

    /// Refresh canonical time and arrivals, then recompose both lines
    ///
    /// Only a transport fault propagates (and triggers the cycle retry);
    /// unusable bodies degrade to the extrapolated clock or an empty
    /// board.
    fn refresh_schedule(&mut self, now_ms: u64) -> Result<(), FetchError> {
        match self.clock_source.fetch_time() {
            Ok(reading) => {
                // Parse failure falls back to the previous sync, already
                // counted inside the clock
                let _ = self.clock.sync(&reading, now_ms);
            }
            Err(FetchError::Payload) => self.clock.mark_fallback(),
            Err(FetchError::Transport) => return Err(FetchError::Transport),
        }

        let payload = match self.transit.fetch_arrivals(self.config.station) {
            Ok(payload) => payload,
            Err(FetchError::Payload) => TransitPayload::default(),
            Err(FetchError::Transport) => return Err(FetchError::Transport),
        };

        let board = ScheduleBoard::build(&payload, self.clock.now(now_ms), self.config.min_minutes);
        self.dropped_last_cycle = board.dropped;
        let routes = RouteTable::from_board(&board);

        self.up_content = LineContent::compose_up(&routes, self.weather.as_ref());
        self.down_content = LineContent::compose_down(&routes, self.weather.as_ref());
        self.up_line.rebuild(self.up_content.width);
        self.down_line.rebuild(self.down_content.width);

        Ok(())
    }

    /// Advance both lines one pixel, present, and sleep out the tick
    fn tick(&mut self, now_ms: u64) {
        let frame_width = self.sign.frame_width();
        self.up_line.advance(frame_width);
        self.down_line.advance(frame_width);

        let scene = Scene::new(
            &self.up_content,
            self.up_line.position(),
            &self.down_content,
            self.down_line.position(),
        );
        if self.sign.present(&scene).is_err() {
            // Presentation faults end the cycle like any other fault
            self.director.cycle_failed(now_ms);
            return;
        }

        self.director.ticked();
        self.mono.sleep_ms(self.tick_interval_ms);
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.director.state()
    }

    /// Failed-cycle retries so far
    pub fn retries(&self) -> u32 {
        self.director.retries()
    }

    /// The canonical clock (for diagnostics)
    pub fn clock(&self) -> &CanonicalClock {
        &self.clock
    }

    /// Arrival records dropped as unparseable in the last cycle
    pub fn dropped_last_cycle(&self) -> u8 {
        self.dropped_last_cycle
    }

    /// The current weather snapshot, if one has been fetched
    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    /// Composed upward line content
    pub fn up_content(&self) -> &LineContent {
        &self.up_content
    }

    /// Composed downward line content
    pub fn down_content(&self) -> &LineContent {
        &self.down_content
    }

    /// Collaborator access, mainly for inspection in tests
    pub fn sign(&self) -> &S {
        &self.sign
    }

    pub fn transit(&self) -> &T {
        &self.transit
    }

    pub fn weather_feed(&self) -> &W {
        &self.weather_feed
    }

    pub fn clock_source(&self) -> &C {
        &self.clock_source
    }
}
