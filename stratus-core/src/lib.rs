//! State-and-telemetry engine for the Stratus environmental monitoring node
//!
//! Samples temperature/humidity/pressure on a fixed cadence, derives
//! altitude, keeps a bounded rolling history, evaluates configurable alarm
//! bands, drives local feedback (display, RGB indicator, buzzer, glyph
//! panel) and serves current state plus a live history window over a
//! minimal single-connection HTTP/JSON interface.
//!
//! Key constraints:
//! - Single thread of control, cooperative scheduling only
//! - No heap allocation in the tick path
//! - Wire-exact JSON formatting (fixed decimal widths)
//!
//! ```no_run
//! use stratus_core::{Station, time::StdClock};
//!
//! let mut station: Station = Station::new();
//! let clock = StdClock::new();
//! // Each pass: drain buttons, maybe sample, service the network.
//! // station.run_pass(&mut board, &mut transport, &clock);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alarm;
pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod history;
pub mod http;
pub mod page;
pub mod reading;
pub mod station;
pub mod time;
pub mod traits;
pub mod ui;

// Public API
pub use alarm::{AlarmEvaluator, AlarmState, Glyph, IndicatorState};
pub use config::Config;
pub use errors::{StationError, StationResult};
pub use history::HistoryRing;
pub use reading::{BaroSample, ClimateSample, Reading};
pub use station::Station;

/// Crate version, for the banner line logged at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
