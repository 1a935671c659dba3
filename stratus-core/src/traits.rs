//! Seams between the engine and the hardware
//!
//! The core never touches a bus or a pin. Everything physical sits behind
//! one of these traits, implemented by real drivers in firmware and by
//! scripted fakes in tests and the simulator. Keep them narrow - the
//! engine only needs what the scheduler loop actually calls.

use crate::alarm::{Glyph, IndicatorState};
use crate::errors::StationResult;
use crate::reading::{BaroSample, ClimateSample};

/// Connectivity state shown on the network status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Associated, with the station's IPv4 address
    Up([u8; 4]),
    /// No link; the node runs standalone
    Down,
}

/// Everything the scheduler asks of the physical board.
///
/// A failed climate read reports [`StationError::SensorUnavailable`] and
/// the whole tick update is skipped; the barometer read is assumed to
/// succeed whenever the climate read did (they share the bus and init
/// path).
///
/// [`StationError::SensorUnavailable`]: crate::errors::StationError::SensorUnavailable
pub trait Board {
    /// Text display type this board drives.
    type Display: TextDisplay;

    /// Sample the hygrometer.
    fn climate(&mut self) -> StationResult<ClimateSample>;

    /// Sample the barometer.
    fn baro(&mut self) -> BaroSample;

    /// Set the steady RGB indicator.
    fn indicator(&mut self, state: IndicatorState);

    /// Pulse the buzzer for `ms` milliseconds.
    fn beep(&mut self, ms: u32);

    /// Show a glyph on the LED panel.
    fn glyph(&mut self, glyph: Glyph);

    /// Access the text display sink.
    fn display(&mut self) -> &mut Self::Display;

    /// Current network link state, for the status page.
    fn link(&self) -> Link;

    /// Reset the device. Terminal: the process restarts and nothing after
    /// the call runs on hardware. Fakes record the call and return.
    fn reset(&mut self);
}

/// Pre-formatted-text sink for the 128x64 status display.
///
/// Coordinates are pixels; the engine draws 8px glyph rows. Purely a sink:
/// nothing is ever read back.
pub trait TextDisplay {
    /// Blank the frame buffer.
    fn clear(&mut self);
    /// Draw a string with its top-left corner at (x, y).
    fn text(&mut self, s: &str, x: u8, y: u8);
    /// Draw a full-width horizontal rule at row y.
    fn hline(&mut self, y: u8);
    /// Push the frame buffer to the panel.
    fn flush(&mut self);
}
