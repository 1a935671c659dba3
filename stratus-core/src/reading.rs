//! Sensor samples and the derived per-tick reading
//!
//! Two driver-facing sample types mirror what the hardware actually
//! delivers: a combined temperature/humidity sample from the hygrometer and
//! a temperature/pressure sample from the barometer. Each tick the scheduler
//! folds them, together with the configured calibration offsets, into one
//! [`Reading`] — the value the display, the telemetry codec and the history
//! all consume.
//!
//! Altitude is derived from the *unoffset* pressure via the international
//! barometric formula:
//!
//! ```text
//! h = 44330 * (1 - (p / p0)^0.1903)      p, p0 in Pascal
//! ```

use libm::powf;

use crate::config::Config;
use crate::constants::{BAROMETRIC_EXPONENT, BAROMETRIC_SCALE_M, SEA_LEVEL_PRESSURE_PA};

/// One sample from the hygrometer: temperature in °C, relative humidity in %.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    /// Air temperature, °C
    pub temperature: f32,
    /// Relative humidity, %RH
    pub humidity: f32,
}

/// One sample from the barometer: temperature in °C, pressure in hPa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaroSample {
    /// Die temperature, °C (used for compensation inside the driver,
    /// not surfaced in telemetry)
    pub temperature: f32,
    /// Station pressure, hPa
    pub pressure: f32,
}

/// Raw per-tick values before calibration, kept alongside the adjusted
/// [`Reading`] because the alarm evaluator compares against raw values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSample {
    /// Unoffset temperature, °C
    pub temperature: f32,
    /// Unoffset humidity, %RH
    pub humidity: f32,
    /// Unoffset pressure, hPa
    pub pressure: f32,
}

/// Offset-adjusted reading for one tick.
///
/// Not retained beyond the tick except through the history ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    /// Calibrated temperature, °C
    pub temperature: f32,
    /// Calibrated humidity, %RH
    pub humidity: f32,
    /// Calibrated pressure, hPa
    pub pressure: f32,
    /// Altitude above mean sea level, m (from unoffset pressure)
    pub altitude: f32,
}

impl Reading {
    /// Fold the two raw samples and the calibration offsets into the
    /// reading for this tick. Returns the reading together with the raw
    /// values the alarm evaluator needs.
    pub fn from_samples(climate: ClimateSample, baro: BaroSample, config: &Config) -> (Self, RawSample) {
        let raw = RawSample {
            temperature: climate.temperature,
            humidity: climate.humidity,
            pressure: baro.pressure,
        };
        let reading = Self {
            temperature: climate.temperature + config.temp_offset,
            humidity: climate.humidity + config.humid_offset,
            pressure: baro.pressure + config.press_offset,
            altitude: altitude_from_hpa(baro.pressure),
        };
        (reading, raw)
    }
}

/// Barometric altitude in metres from a station pressure in hPa.
pub fn altitude_from_hpa(pressure_hpa: f32) -> f32 {
    let pressure_pa = pressure_hpa * 100.0;
    BAROMETRIC_SCALE_M * (1.0 - powf(pressure_pa / SEA_LEVEL_PRESSURE_PA, BAROMETRIC_EXPONENT))
}
