//! Request dispatch and response framing
//!
//! ## Protocol
//!
//! One unauthenticated listener, one in-flight connection at a time. A
//! request buffer is classified by substring match, first match wins, in a
//! fixed order:
//!
//! 1. `GET /api/data`    → live telemetry JSON
//! 2. `GET /api/config`  → configuration JSON
//! 3. `POST /api/config` → positional body parse, unconditional `OK`
//! 4. anything else      → the static dashboard page
//!
//! "Not found" is never produced; malformed and header-only requests fall
//! through to the page. Every response declares `Content-Length` and
//! `Connection: close`, and the connection is torn down once the declared
//! byte count has been acknowledged as sent.
//!
//! ## Transport seam
//!
//! The engine does not own sockets. A [`Transport`] is polled once per
//! scheduler pass and feeds events into an [`HttpService`] (implemented by
//! the station): inbound request bytes, send acknowledgments, disconnects.
//! The transport writes whatever [`HttpService::pending`] exposes and
//! closes the connection once it returns `None`.

use core::fmt::Write;

use heapless::String;

use crate::codec;
use crate::config::Config;
use crate::constants::{JSON_CAPACITY, RESPONSE_CAPACITY};
use crate::errors::StationError;
use crate::history::HistoryRing;
use crate::page;
use crate::reading::Reading;

/// The four request classes, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /api/data`
    Data,
    /// `GET /api/config`
    ConfigGet,
    /// `POST /api/config`
    ConfigPost,
    /// Everything else: the static dashboard
    Page,
}

impl Route {
    /// Classify a raw request buffer. Substring match, first match wins,
    /// checked in declaration order.
    pub fn classify(request: &[u8]) -> Self {
        if contains(request, b"GET /api/data") {
            Route::Data
        } else if contains(request, b"GET /api/config") {
            Route::ConfigGet
        } else if contains(request, b"POST /api/config") {
            Route::ConfigPost
        } else {
            Route::Page
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Locate the request body: everything after the first blank line.
pub fn body_of(request: &[u8]) -> Option<&[u8]> {
    let sep = b"\r\n\r\n";
    haystack_position(request, sep).map(|at| &request[at + sep.len()..])
}

fn haystack_position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// State of the single in-flight connection: the framed response and how
/// much of it the peer has acknowledged.
pub struct HttpConn {
    response: String<RESPONSE_CAPACITY>,
    sent: usize,
}

impl HttpConn {
    /// Bytes not yet acknowledged as sent.
    pub fn pending(&self) -> &[u8] {
        &self.response.as_bytes()[self.sent..]
    }

    /// Record `len` more bytes acknowledged.
    pub fn ack(&mut self, len: usize) {
        self.sent = (self.sent + len).min(self.response.len());
    }

    /// True once the declared length has been fully acknowledged.
    pub fn is_complete(&self) -> bool {
        self.sent >= self.response.len()
    }
}

/// What the dispatcher reads to answer `GET /api/data`.
pub struct TelemetryView<'a, const N: usize> {
    /// Latest offset-adjusted reading
    pub reading: &'a Reading,
    /// Rolling history window
    pub history: &'a HistoryRing<N>,
    /// Whether the alert field is included
    pub alarm_active: bool,
}

/// Side effect a dispatched request asks of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchEffect {
    /// Confirmation pulse after an accepted config write
    pub beep_ms: Option<u32>,
}

/// Dispatch one request to its handler and frame the response.
///
/// A config POST mutates `config` in place (positionally, possibly a
/// prefix) and still answers `OK`. The only error is a response that
/// cannot fit the connection buffer; the caller drops the connection.
pub fn dispatch<const N: usize>(
    request: &[u8],
    view: TelemetryView<'_, N>,
    config: &mut Config,
) -> Result<(HttpConn, DispatchEffect), StationError> {
    let mut effect = DispatchEffect::default();

    let conn = match Route::classify(request) {
        Route::Data => {
            let mut body: String<JSON_CAPACITY> = String::new();
            codec::write_telemetry(&mut body, view.reading, view.history, view.alarm_active)
                .map_err(|_| StationError::ConnFull { needed: JSON_CAPACITY })?;
            frame(&body, "application/json")?
        }
        Route::ConfigGet => {
            let mut body: String<JSON_CAPACITY> = String::new();
            codec::write_config(&mut body, config)
                .map_err(|_| StationError::ConnFull { needed: JSON_CAPACITY })?;
            frame(&body, "application/json")?
        }
        Route::ConfigPost => {
            if let Some(body) = body_of(request) {
                codec::parse_config(body, config);
                effect.beep_ms = Some(crate::constants::BEEP_CONFIG_MS);
            }
            frame("OK", "text/plain")?
        }
        Route::Page => frame_page()?,
    };

    Ok((conn, effect))
}

fn frame(body: &str, content_type: &str) -> Result<HttpConn, StationError> {
    let mut response: String<RESPONSE_CAPACITY> = String::new();
    write!(
        response,
        "HTTP/1.1 200 OK\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len(),
    )
    .map_err(|_| StationError::ConnFull { needed: body.len() })?;
    Ok(HttpConn { response, sent: 0 })
}

fn frame_page() -> Result<HttpConn, StationError> {
    let mut response: String<RESPONSE_CAPACITY> = String::new();
    write!(
        response,
        "HTTP/1.1 200 OK\r\n\
         Content-Type: text/html\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        page::page_len(),
    )
    .and_then(|()| response.write_str(page::HTML_HEADER))
    .and_then(|()| response.write_str(page::HTML_BODY))
    .and_then(|()| response.write_str(page::HTML_SCRIPT))
    .map_err(|_| StationError::ConnFull { needed: page::page_len() })?;
    Ok(HttpConn { response, sent: 0 })
}

/// Engine-side half of the transport seam; the station implements this.
pub trait HttpService {
    /// A complete request buffer arrived on a fresh connection. Returns
    /// `false` when no response could be prepared (the transport drops the
    /// connection without replying).
    fn handle_request(&mut self, request: &[u8]) -> bool;

    /// Unsent response bytes for the in-flight connection, or `None` when
    /// there is nothing left to send and the transport should close.
    fn pending(&self) -> Option<&[u8]>;

    /// `len` more response bytes were acknowledged as sent.
    fn mark_sent(&mut self, len: usize);

    /// The peer disconnected; in-flight state is discarded.
    fn connection_closed(&mut self);
}

/// Connection-oriented byte-stream transport, polled cooperatively.
///
/// One call per scheduler pass. The implementation accepts at most one
/// connection at a time, delivers its request via
/// [`HttpService::handle_request`], pushes [`HttpService::pending`] bytes
/// out as the peer allows (acknowledging with [`HttpService::mark_sent`]),
/// and closes once `pending` returns `None`.
pub trait Transport {
    /// Service pending network events, non-blocking.
    fn poll(&mut self, service: &mut dyn HttpService);
}
