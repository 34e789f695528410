//! Wi-Fi co-processor link client
//!
//! Implements the engine's three network collaborator traits over the
//! framed UART protocol from `headway-feeds`. All calls block; the
//! session loop is the only thing running on this core, so blocking here
//! is exactly the suspension the engine expects. There is deliberately no
//! read timeout - a stalled co-processor stalls the loop, and the session
//! cap still bounds total runtime.

use core::cell::RefCell;

use defmt::*;
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Blocking, Uart};
use heapless::String;

use headway_core::traits::{ClockSource, FetchError, TransitFeed, WeatherFeed};
use headway_feeds::payload::{decode_transit, decode_weather};
use headway_feeds::{
    ClockReading, LinkDecoder, LinkRequest, LinkResponse, RemoteError, TransitPayload,
    WeatherPayload,
};

/// Blocking client for the co-processor link
pub struct LinkClient {
    uart: Uart<'static, UART1, Blocking>,
    decoder: LinkDecoder,
}

impl LinkClient {
    pub fn new(uart: Uart<'static, UART1, Blocking>) -> Self {
        Self {
            uart,
            decoder: LinkDecoder::new(),
        }
    }

    /// Send one request and block until a response frame decodes
    fn request(&mut self, request: &LinkRequest) -> Result<LinkResponse, FetchError> {
        let mut wire = [0u8; 256];
        let len = request
            .encode(&mut wire)
            .map_err(|_| FetchError::Transport)?;
        self.uart
            .blocking_write(&wire[..len])
            .map_err(|_| FetchError::Transport)?;

        self.decoder.reset();
        loop {
            let mut byte = [0u8; 1];
            self.uart
                .blocking_read(&mut byte)
                .map_err(|_| FetchError::Transport)?;

            match self.decoder.push(byte[0]) {
                Ok(Some(frame)) => {
                    return LinkResponse::decode(&frame).map_err(|_| FetchError::Payload)
                }
                Ok(None) => {}
                Err(error) => {
                    // Decoder already resynchronized; keep reading
                    warn!("link frame error: {:?}", error);
                }
            }
        }
    }

    fn fetch_time(&mut self) -> Result<ClockReading, FetchError> {
        match self.request(&LinkRequest::GetTime)? {
            LinkResponse::Time(reading) => Ok(reading),
            LinkResponse::Failed(error) => Err(remote_error(error)),
            LinkResponse::Body(_) => Err(FetchError::Payload),
        }
    }

    fn fetch_arrivals(&mut self, station: &str) -> Result<TransitPayload, FetchError> {
        let mut id = String::new();
        let _ = id.push_str(station);

        match self.request(&LinkRequest::GetArrivals { station: id })? {
            LinkResponse::Body(body) => {
                decode_transit(&body).map_err(|_| FetchError::Payload)
            }
            LinkResponse::Failed(error) => Err(remote_error(error)),
            LinkResponse::Time(_) => Err(FetchError::Payload),
        }
    }

    fn fetch_weather(&mut self, city: &str, api_key: &str) -> Result<WeatherPayload, FetchError> {
        let mut city_query = String::new();
        let _ = city_query.push_str(city);
        let mut key = String::new();
        let _ = key.push_str(api_key);

        let request = LinkRequest::GetWeather {
            city: city_query,
            key: Some(key),
        };
        match self.request(&request)? {
            LinkResponse::Body(body) => {
                decode_weather(&body).map_err(|_| FetchError::Payload)
            }
            LinkResponse::Failed(error) => Err(remote_error(error)),
            LinkResponse::Time(_) => Err(FetchError::Payload),
        }
    }
}

/// All upstream failures are transport faults to the engine
fn remote_error(error: RemoteError) -> FetchError {
    warn!("co-processor reported fetch failure: {:?}", error);
    FetchError::Transport
}

/// Shared handle so one link can serve all three collaborator seams
///
/// The session loop is strictly sequential, so the RefCell borrows never
/// overlap.
pub struct LinkHandle<'a> {
    link: &'a RefCell<LinkClient>,
}

impl<'a> LinkHandle<'a> {
    pub fn new(link: &'a RefCell<LinkClient>) -> Self {
        Self { link }
    }
}

impl ClockSource for LinkHandle<'_> {
    fn fetch_time(&mut self) -> Result<ClockReading, FetchError> {
        self.link.borrow_mut().fetch_time()
    }
}

impl TransitFeed for LinkHandle<'_> {
    fn fetch_arrivals(&mut self, station: &str) -> Result<TransitPayload, FetchError> {
        self.link.borrow_mut().fetch_arrivals(station)
    }
}

impl WeatherFeed for LinkHandle<'_> {
    fn fetch_weather(&mut self, city: &str, api_key: &str) -> Result<WeatherPayload, FetchError> {
        self.link.borrow_mut().fetch_weather(city, api_key)
    }
}
