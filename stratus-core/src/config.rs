//! Alarm thresholds and calibration offsets
//!
//! ## Ownership
//!
//! There is exactly one `Config` per node, owned by the scheduler and passed
//! by reference into the alarm evaluator and the telemetry codec, and by
//! mutable reference into the dispatcher's write-config path. The
//! single-threaded cooperative loop already serializes all access, so no
//! interior mutability is needed.
//!
//! ## Invariants (and the one that is NOT)
//!
//! `min < max` is *not* enforced anywhere. A client can configure an
//! inverted band, which makes the corresponding channel permanently in
//! alarm. Well-behaved clients keep the bands sane; the node does not.

/// Per-channel alarm bands and additive calibration offsets.
///
/// Field order matters on the wire: the config JSON document is emitted and
/// parsed in exactly this order (see [`crate::codec`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Lower edge of the temperature band, °C
    pub temp_min: f32,
    /// Upper edge of the temperature band, °C
    pub temp_max: f32,
    /// Lower edge of the humidity band, %RH
    pub humid_min: f32,
    /// Upper edge of the humidity band, %RH
    pub humid_max: f32,
    /// Lower edge of the pressure band, hPa
    pub press_min: f32,
    /// Upper edge of the pressure band, hPa
    pub press_max: f32,
    /// Additive temperature calibration, °C
    pub temp_offset: f32,
    /// Additive humidity calibration, %RH
    pub humid_offset: f32,
    /// Additive pressure calibration, hPa
    pub press_offset: f32,
}

impl Default for Config {
    /// Factory bands: 10–35 °C, 20–80 %RH, 900–1100 hPa, zero offsets.
    fn default() -> Self {
        Self {
            temp_min: 10.0,
            temp_max: 35.0,
            humid_min: 20.0,
            humid_max: 80.0,
            press_min: 900.0,
            press_max: 1100.0,
            temp_offset: 0.0,
            humid_offset: 0.0,
            press_offset: 0.0,
        }
    }
}

impl Config {
    /// Number of fields a complete config document carries.
    pub const FIELD_COUNT: usize = 9;

    /// JSON keys in wire order.
    pub const KEYS: [&'static str; Self::FIELD_COUNT] = [
        "temp_min",
        "temp_max",
        "humid_min",
        "humid_max",
        "press_min",
        "press_max",
        "temp_offset",
        "humid_offset",
        "press_offset",
    ];

    /// Field values in wire order.
    pub fn values(&self) -> [f32; Self::FIELD_COUNT] {
        [
            self.temp_min,
            self.temp_max,
            self.humid_min,
            self.humid_max,
            self.press_min,
            self.press_max,
            self.temp_offset,
            self.humid_offset,
            self.press_offset,
        ]
    }

    /// Mutable references to the fields in wire order, for the positional
    /// parser which applies a document strictly left-to-right.
    pub fn fields_mut(&mut self) -> [&mut f32; Self::FIELD_COUNT] {
        [
            &mut self.temp_min,
            &mut self.temp_max,
            &mut self.humid_min,
            &mut self.humid_max,
            &mut self.press_min,
            &mut self.press_max,
            &mut self.temp_offset,
            &mut self.humid_offset,
            &mut self.press_offset,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_factory_bands() {
        let config = Config::default();
        assert_eq!(config.temp_min, 10.0);
        assert_eq!(config.temp_max, 35.0);
        assert_eq!(config.press_max, 1100.0);
        assert_eq!(config.humid_offset, 0.0);
    }

    #[test]
    fn wire_order_is_stable() {
        assert_eq!(Config::KEYS[0], "temp_min");
        assert_eq!(Config::KEYS[8], "press_offset");

        let mut config = Config::default();
        *config.fields_mut()[8] = 2.5;
        assert_eq!(config.press_offset, 2.5);
        assert_eq!(config.values()[8], 2.5);
    }
}
