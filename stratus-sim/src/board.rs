//! Fake board: synthetic weather, feedback via the log.
//!
//! Sensors follow slow sine waves around plausible indoor values so the
//! dashboard charts move and thresholds can be tripped by tightening the
//! bands at runtime. Indicator and glyph changes are logged only on
//! transitions to keep the output readable.

use std::f32::consts::TAU;
use std::time::Instant;

use stratus_core::alarm::{Glyph, IndicatorState};
use stratus_core::reading::{BaroSample, ClimateSample};
use stratus_core::traits::{Board, Link, TextDisplay};
use stratus_core::StationResult;

/// Display that logs each flushed frame at debug level.
#[derive(Default)]
pub struct LogDisplay {
    lines: Vec<String>,
}

impl TextDisplay for LogDisplay {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn text(&mut self, s: &str, _x: u8, _y: u8) {
        self.lines.push(s.to_string());
    }

    fn hline(&mut self, _y: u8) {}

    fn flush(&mut self) {
        log::debug!("display: {}", self.lines.join(" | "));
    }
}

pub struct SimBoard {
    start: Instant,
    display: LogDisplay,
    indicator: Option<IndicatorState>,
    glyph: Option<Glyph>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            display: LogDisplay::default(),
            indicator: None,
            glyph: None,
        }
    }

    /// Phase of the synthetic weather, one full cycle per ten minutes.
    fn phase(&self) -> f32 {
        let seconds = self.start.elapsed().as_secs_f32();
        (seconds / 600.0) * TAU
    }
}

impl Board for SimBoard {
    type Display = LogDisplay;

    fn climate(&mut self) -> StationResult<ClimateSample> {
        let phase = self.phase();
        Ok(ClimateSample {
            temperature: 22.0 + 4.0 * phase.sin(),
            humidity: 50.0 + 15.0 * (phase * 0.7).sin(),
        })
    }

    fn baro(&mut self) -> BaroSample {
        let phase = self.phase();
        let pressure = 1008.0 + 6.0 * (phase * 0.3).cos();
        BaroSample { temperature: 22.3, pressure }
    }

    fn indicator(&mut self, state: IndicatorState) {
        if self.indicator != Some(state) {
            self.indicator = Some(state);
            let (r, g, b) = state.rgb();
            log::info!("indicator -> {state:?} (r={r} g={g} b={b})");
        }
    }

    fn beep(&mut self, ms: u32) {
        log::info!("beep {ms}ms");
    }

    fn glyph(&mut self, glyph: Glyph) {
        if self.glyph != Some(glyph) {
            self.glyph = Some(glyph);
            log::info!("glyph -> {glyph:?}");
        }
    }

    fn display(&mut self) -> &mut LogDisplay {
        &mut self.display
    }

    fn link(&self) -> Link {
        Link::Up([127, 0, 0, 1])
    }

    fn reset(&mut self) {
        log::warn!("device reset requested, exiting");
        std::process::exit(0);
    }
}
