//! Threshold alarm evaluator
//!
//! ## Overview
//!
//! A pure band check per channel — `value < min || value > max` — OR-ed into
//! one `active` flag, plus the side-effect directives that give the alarm a
//! physical presence: an RGB indicator state, an optional buzzer pulse and
//! an optional glyph for the LED panel.
//!
//! The evaluator is pure with respect to its inputs but carries one bit of
//! state: the blink phase. While the alarm stays active, successive calls
//! alternate between a bright phase (red+blue, audible pulse, alarm glyph)
//! and a dim phase (blue only, silent). The bit is deliberately not reset
//! when the alarm clears, matching the deployed behavior.
//!
//! ## Raw versus calibrated values
//!
//! The evaluator compares the **raw** (unoffset) sample against the bands,
//! while history and telemetry carry offset-adjusted values. This asymmetry
//! is inherited from the deployed firmware and preserved for behavioral
//! fidelity; see DESIGN.md.

use crate::config::Config;
use crate::reading::RawSample;

/// Which channels breached their band this tick, and the OR of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmState {
    /// Temperature outside `[temp_min, temp_max]`
    pub temperature: bool,
    /// Humidity outside `[humid_min, humid_max]`
    pub humidity: bool,
    /// Pressure outside `[press_min, press_max]`
    pub pressure: bool,
    /// Any channel breached
    pub active: bool,
}

/// Steady RGB indicator directives the evaluator can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Green + blue: all channels inside their bands
    Normal,
    /// Red + blue: bright phase of the alarm blink
    AlarmBright,
    /// Blue only: dim phase of the alarm blink
    AlarmDim,
    /// Red + green (yellow): reset-button confirmation
    Confirm,
}

impl IndicatorState {
    /// Channel levels as (red, green, blue).
    pub const fn rgb(self) -> (bool, bool, bool) {
        match self {
            Self::Normal => (false, true, true),
            Self::AlarmBright => (true, false, true),
            Self::AlarmDim => (false, false, true),
            Self::Confirm => (true, true, false),
        }
    }
}

/// Glyphs the 5x5 LED panel can show.
///
/// `Blank` is what a panel shows right after init; the evaluator itself
/// never selects it. Kept as a real variant rather than deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Hollow blue square: normal operation
    Normal,
    /// Red diagonal cross: alarm
    Alarm,
    /// All pixels off
    Blank,
}

impl Glyph {
    /// 5x5 pixel pattern, row-major, `(r, g, b)` per pixel.
    pub const fn pixels(self) -> [[(u8, u8, u8); 5]; 5] {
        const B: (u8, u8, u8) = (0, 0, 110);
        const R: (u8, u8, u8) = (110, 0, 0);
        const O: (u8, u8, u8) = (0, 0, 0);
        match self {
            Glyph::Normal => [
                [O, B, B, B, O],
                [B, O, O, O, B],
                [B, O, O, O, B],
                [B, O, O, O, B],
                [O, B, B, B, O],
            ],
            Glyph::Alarm => [
                [R, O, O, O, R],
                [O, R, O, R, O],
                [O, O, R, O, O],
                [O, R, O, R, O],
                [R, O, O, O, R],
            ],
            Glyph::Blank => [[O; 5]; 5],
        }
    }
}

/// What one evaluation asks the scheduler to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmOutput {
    /// Breach flags for this tick
    pub state: AlarmState,
    /// Indicator directive for this tick
    pub indicator: IndicatorState,
    /// Buzzer pulse length, if any
    pub beep_ms: Option<u32>,
    /// Glyph to show, or `None` to leave the panel unchanged
    pub glyph: Option<Glyph>,
}

/// Band evaluator with the persistent blink-phase bit.
#[derive(Debug, Default)]
pub struct AlarmEvaluator {
    blink: bool,
}

impl AlarmEvaluator {
    /// Fresh evaluator; first active tick starts on the bright phase.
    pub const fn new() -> Self {
        Self { blink: false }
    }

    /// Evaluate the raw sample for this tick against the configured bands.
    ///
    /// The glyph is only set on the bright blink phase while active, and to
    /// [`Glyph::Normal`] while inactive; the dim phase leaves whatever the
    /// panel currently shows.
    pub fn evaluate(&mut self, raw: &RawSample, config: &Config) -> AlarmOutput {
        let state = AlarmState {
            temperature: outside(raw.temperature, config.temp_min, config.temp_max),
            humidity: outside(raw.humidity, config.humid_min, config.humid_max),
            pressure: outside(raw.pressure, config.press_min, config.press_max),
            active: false,
        };
        let state = AlarmState {
            active: state.temperature || state.humidity || state.pressure,
            ..state
        };

        if state.active {
            self.blink = !self.blink;
            if self.blink {
                AlarmOutput {
                    state,
                    indicator: IndicatorState::AlarmBright,
                    beep_ms: Some(crate::constants::BEEP_ALARM_MS),
                    glyph: Some(Glyph::Alarm),
                }
            } else {
                AlarmOutput {
                    state,
                    indicator: IndicatorState::AlarmDim,
                    beep_ms: None,
                    glyph: None,
                }
            }
        } else {
            AlarmOutput {
                state,
                indicator: IndicatorState::Normal,
                beep_ms: None,
                glyph: Some(Glyph::Normal),
            }
        }
    }
}

fn outside(value: f32, min: f32, max: f32) -> bool {
    value < min || value > max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f32, h: f32, p: f32) -> RawSample {
        RawSample { temperature: t, humidity: h, pressure: p }
    }

    #[test]
    fn inside_all_bands_is_quiet() {
        let mut eval = AlarmEvaluator::new();
        let out = eval.evaluate(&sample(22.0, 50.0, 1000.0), &Config::default());
        assert!(!out.state.active);
        assert_eq!(out.indicator, IndicatorState::Normal);
        assert_eq!(out.beep_ms, None);
        assert_eq!(out.glyph, Some(Glyph::Normal));
    }

    #[test]
    fn single_channel_breach_flips_only_that_flag() {
        let mut eval = AlarmEvaluator::new();
        let config = Config::default();

        let out = eval.evaluate(&sample(40.0, 50.0, 1000.0), &config);
        assert!(out.state.active);
        assert!(out.state.temperature);
        assert!(!out.state.humidity);
        assert!(!out.state.pressure);

        let out = eval.evaluate(&sample(22.0, 10.0, 1000.0), &config);
        assert!(out.state.active && out.state.humidity);
        assert!(!out.state.temperature && !out.state.pressure);

        let out = eval.evaluate(&sample(22.0, 50.0, 1200.0), &config);
        assert!(out.state.active && out.state.pressure);
    }

    #[test]
    fn band_edges_are_inclusive() {
        let mut eval = AlarmEvaluator::new();
        let config = Config::default();
        assert!(!eval.evaluate(&sample(10.0, 20.0, 900.0), &config).state.active);
        assert!(!eval.evaluate(&sample(35.0, 80.0, 1100.0), &config).state.active);
        assert!(eval.evaluate(&sample(35.1, 50.0, 1000.0), &config).state.active);
    }

    #[test]
    fn blink_alternates_between_two_directives() {
        let mut eval = AlarmEvaluator::new();
        let config = Config::default();
        let hot = sample(50.0, 50.0, 1000.0);

        let first = eval.evaluate(&hot, &config);
        let second = eval.evaluate(&hot, &config);
        let third = eval.evaluate(&hot, &config);

        assert_eq!(first.indicator, IndicatorState::AlarmBright);
        assert_eq!(first.beep_ms, Some(100));
        assert_eq!(first.glyph, Some(Glyph::Alarm));

        assert_eq!(second.indicator, IndicatorState::AlarmDim);
        assert_eq!(second.beep_ms, None);
        assert_eq!(second.glyph, None);

        assert_eq!(third.indicator, first.indicator);
    }

    #[test]
    fn blink_phase_survives_a_clear() {
        let mut eval = AlarmEvaluator::new();
        let config = Config::default();
        let hot = sample(50.0, 50.0, 1000.0);
        let ok = sample(22.0, 50.0, 1000.0);

        eval.evaluate(&hot, &config); // bright
        eval.evaluate(&ok, &config); // clears, phase bit stays set
        let resumed = eval.evaluate(&hot, &config);
        assert_eq!(resumed.indicator, IndicatorState::AlarmDim);
    }

    #[test]
    fn inverted_band_alarms_forever() {
        // min > max is not validated; the channel can never be inside
        let mut eval = AlarmEvaluator::new();
        let config = Config { temp_min: 30.0, temp_max: 10.0, ..Config::default() };
        assert!(eval.evaluate(&sample(20.0, 50.0, 1000.0), &config).state.active);
    }
}
