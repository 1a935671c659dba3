//! The cooperative scheduler loop
//!
//! ## One pass
//!
//! ```text
//! run_pass:
//!   1. drain button mailbox      (page cycle / reset)
//!   2. if >= 1000 ms elapsed:    at most ONE sample, never batched
//!        read sensors → history.push → alarm evaluate
//!        → indicator/buzzer/glyph → display render
//!   3. poll transport once       (request dispatch, send progress)
//! ```
//!
//! Everything runs on one logical thread; no two of history push, alarm
//! evaluation, JSON encode/decode, display refresh or network service ever
//! interleave. A slow peer can delay a pass only as far as the transport's
//! own non-blocking write allows. If a tick overruns, the next eligible
//! tick simply runs late — elapsed time is compared against the interval,
//! ticks are never queued.
//!
//! A failed climate read skips the whole update for that tick: the last
//! reading, the history and the alarm state are all retained.

use crate::alarm::{AlarmEvaluator, AlarmState, IndicatorState};
use crate::config::Config;
use crate::constants::{BEEP_PAGE_MS, BEEP_RESET_MS, HISTORY_LEN, UPDATE_INTERVAL_MS};
use crate::history::HistoryRing;
use crate::http::{self, HttpConn, HttpService, TelemetryView, Transport};
use crate::reading::{RawSample, Reading};
use crate::time::{Clock, Millis};
use crate::traits::Board;
use crate::ui::{self, ButtonMailbox, Page, PageView};

/// The node's entire mutable state, driven by [`Station::run_pass`].
///
/// `N` is the history depth; production uses the default
/// [`HISTORY_LEN`](crate::constants::HISTORY_LEN).
pub struct Station<const N: usize = HISTORY_LEN> {
    config: Config,
    history: HistoryRing<N>,
    evaluator: AlarmEvaluator,
    reading: Reading,
    raw: RawSample,
    alarm: AlarmState,
    page: Page,
    last_update: Option<Millis>,
    conn: Option<HttpConn>,
    pending_beep: Option<u32>,
}

impl<const N: usize> Station<N> {
    /// Fresh station: factory config, empty history, overview page.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            history: HistoryRing::new(),
            evaluator: AlarmEvaluator::new(),
            reading: Reading::default(),
            raw: RawSample::default(),
            alarm: AlarmState::default(),
            page: Page::default(),
            last_update: None,
            conn: None,
            pending_beep: None,
        }
    }

    /// Current thresholds and offsets.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Latest offset-adjusted reading.
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// Breach flags from the last evaluated tick.
    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    /// Rolling history window.
    pub fn history(&self) -> &HistoryRing<N> {
        &self.history
    }

    /// Currently selected display page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// One pass of the cooperative loop.
    pub fn run_pass<B, T, C>(
        &mut self,
        board: &mut B,
        transport: &mut T,
        mailbox: &ButtonMailbox,
        clock: &C,
    ) where
        B: Board,
        T: Transport,
        C: Clock,
    {
        let now = clock.now_ms();

        self.handle_buttons(board, mailbox);

        let due = match self.last_update {
            None => true,
            Some(last) => now.saturating_sub(last) >= UPDATE_INTERVAL_MS,
        };
        if due {
            self.last_update = Some(now);
            self.sample_tick(board);
        }

        transport.poll(self);
        if let Some(ms) = self.pending_beep.take() {
            board.beep(ms);
        }
    }

    fn handle_buttons<B: Board>(&mut self, board: &mut B, mailbox: &ButtonMailbox) {
        let events = mailbox.take();

        if events.a {
            self.page = self.page.next();
            board.beep(BEEP_PAGE_MS);
        }

        if events.b {
            // Terminal: confirmation feedback, then the device restarts.
            board.beep(BEEP_RESET_MS);
            board.indicator(IndicatorState::Confirm);
            board.reset();
        }
    }

    fn sample_tick<B: Board>(&mut self, board: &mut B) {
        let climate = match board.climate() {
            Ok(climate) => climate,
            Err(_e) => {
                // Not fatal: keep the previous reading and history.
                #[cfg(feature = "log")]
                log::warn!("{_e}");
                #[cfg(feature = "defmt")]
                defmt::warn!("{}", _e);
                return;
            }
        };
        let baro = board.baro();

        let (reading, raw) = Reading::from_samples(climate, baro, &self.config);
        self.reading = reading;
        self.raw = raw;
        self.history
            .push(reading.temperature, reading.humidity, reading.pressure);

        let out = self.evaluator.evaluate(&self.raw, &self.config);
        self.alarm = out.state;
        board.indicator(out.indicator);
        if let Some(ms) = out.beep_ms {
            board.beep(ms);
        }
        if let Some(glyph) = out.glyph {
            board.glyph(glyph);
        }

        let link = board.link();
        let view = PageView {
            reading: &self.reading,
            config: &self.config,
            alarm_active: self.alarm.active,
            link,
        };
        ui::render(board.display(), self.page, &view);

        #[cfg(feature = "log")]
        log::debug!(
            "T={:.1}C H={:.1}% P={:.1}hPa A={:.1}m alarm={}",
            self.reading.temperature,
            self.reading.humidity,
            self.reading.pressure,
            self.reading.altitude,
            self.alarm.active,
        );
    }
}

impl<const N: usize> Default for Station<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> HttpService for Station<N> {
    fn handle_request(&mut self, request: &[u8]) -> bool {
        let view = TelemetryView {
            reading: &self.reading,
            history: &self.history,
            alarm_active: self.alarm.active,
        };
        match http::dispatch(request, view, &mut self.config) {
            Ok((conn, effect)) => {
                self.conn = Some(conn);
                if effect.beep_ms.is_some() {
                    self.pending_beep = effect.beep_ms;
                }
                true
            }
            Err(_e) => {
                // Degrade to a dropped connection, no response.
                #[cfg(feature = "log")]
                log::warn!("dropping connection: {_e}");
                self.conn = None;
                false
            }
        }
    }

    fn pending(&self) -> Option<&[u8]> {
        self.conn.as_ref().map(HttpConn::pending)
    }

    fn mark_sent(&mut self, len: usize) {
        if let Some(conn) = self.conn.as_mut() {
            conn.ack(len);
            if conn.is_complete() {
                self.conn = None;
            }
        }
    }

    fn connection_closed(&mut self) {
        self.conn = None;
    }
}
