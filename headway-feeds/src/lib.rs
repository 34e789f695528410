//! Feed payloads and Wi-Fi link protocol for the Headway transit sign
//!
//! The sign MCU has no radio of its own. An ESP32 co-processor handles
//! Wi-Fi association and HTTP, and the two chips talk over a UART link.
//! The co-processor is a dumb fetcher - it returns raw response bodies
//! and the network time reading, and every bit of schedule and display
//! logic stays on the sign MCU.
//!
//! This crate defines both halves of that boundary:
//!
//! - [`payload`]: the shapes the network sources actually deliver - the
//!   polymorphic clock reading, the per-station arrival lists, and the
//!   weather report - plus JSON decode helpers for the response bodies.
//! - [`link`] / [`messages`]: the framed UART protocol and the
//!   request/response messages carried over it.

#![no_std]
#![deny(unsafe_code)]

// Host tests use proptest, which needs the std macros
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod link;
pub mod messages;
pub mod payload;

pub use link::{encode_frame, LinkDecoder, LinkError, LinkFrame, LINK_SYNC, MAX_BODY_LEN};
pub use messages::{LinkRequest, LinkResponse, RemoteError, KIND_REQUEST, KIND_RESPONSE};
pub use payload::{
    ArrivalRecord, CalendarFields, ClockReading, DecodeError, StationEntry, TransitPayload,
    WeatherPayload,
};
