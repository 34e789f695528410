//! Session lifecycle
//!
//! The sign runs one bounded session per power-up: Active for a fixed
//! total duration, then Dormant until someone hits reset. [`machine`]
//! holds the two-state machine, [`director`] decides what the loop should
//! do next at each poll, and [`runner`] is the loop itself, generic over
//! the collaborator traits.

pub mod director;
pub mod machine;
pub mod runner;

pub use director::{Action, Director};
pub use machine::{SessionEvent, SessionState};
pub use runner::CycleRunner;
