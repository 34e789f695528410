//! Board-agnostic engine for the Headway transit sign
//!
//! This crate contains all sign logic that does not depend on specific
//! hardware or network implementations:
//!
//! - Clock normalization (heterogeneous time sources -> canonical UTC epoch)
//! - Schedule aggregation (raw arrivals -> bounded per-route board)
//! - Scroll compositing (analytic pixel layout + per-tick scroll geometry)
//! - Session lifecycle (refresh cadences, bounded run time, error backoff)
//! - Collaborator traits (clock/transit/weather sources, panel, monotonic time)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

// Host tests use proptest, which needs the std macros
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod clock;
pub mod config;
pub mod schedule;
pub mod scroll;
pub mod session;
pub mod traits;
pub mod weather;
