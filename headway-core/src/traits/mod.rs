//! Collaborator abstraction traits
//!
//! These traits define the interface between the sign engine and its
//! external collaborators: the three network sources, the panel, and the
//! host's monotonic clock. Fetches are synchronous and blocking; the
//! engine's only suspension points are these calls and the inter-tick
//! sleep.

pub mod sign;
pub mod time;
pub mod transit;
pub mod weather;

pub use sign::{Sign, SignError};
pub use time::{ClockSource, Monotonic};
pub use transit::TransitFeed;
pub use weather::WeatherFeed;

/// Errors a network collaborator can return
///
/// The split drives the engine's recovery policy: `Transport` is retried
/// at the cycle boundary after a fixed backoff, `Payload` degrades to a
/// safe default (empty schedule, placeholder weather, extrapolated clock)
/// without failing the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// The fetch itself failed (no network, connect/DNS/HTTP failure)
    Transport,
    /// The fetch succeeded but the body was not usable
    Payload,
}
