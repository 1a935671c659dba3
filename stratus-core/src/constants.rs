//! Named constants for the monitoring node
//!
//! Values that appear in more than one module, or that a deployment might
//! reasonably retune, live here. Wire-facing constants (buffer capacities,
//! decimal widths) are part of the observable HTTP contract and must not be
//! changed casually.

/// Sampling cadence: one sensor update per interval, never batched.
pub const UPDATE_INTERVAL_MS: u64 = 1000;

/// Depth of the rolling history window served over `/api/data`.
pub const HISTORY_LEN: usize = 50;

/// Refractory window shared by both buttons. A press on either button
/// suppresses presses on both for this long.
pub const DEBOUNCE_MS: u64 = 200;

/// Mean sea-level pressure in Pascal, for the barometric altitude formula.
pub const SEA_LEVEL_PRESSURE_PA: f32 = 101_325.0;

/// Exponent of the international barometric formula.
pub const BAROMETRIC_EXPONENT: f32 = 0.1903;

/// Altitude scale factor of the barometric formula, in metres.
pub const BAROMETRIC_SCALE_M: f32 = 44_330.0;

/// Capacity of the per-connection HTTP response buffer.
///
/// Sized for the static dashboard page plus headers; the telemetry JSON
/// with a full 50-sample history is well under half of this.
pub const RESPONSE_CAPACITY: usize = 8192;

/// Capacity of the scratch buffer a JSON body is built in before framing.
pub const JSON_CAPACITY: usize = 2048;

/// TCP port the node listens on.
pub const HTTP_PORT: u16 = 80;

/// Buzzer pulse for the page-cycle button.
pub const BEEP_PAGE_MS: u32 = 50;

/// Buzzer pulse for an accepted configuration write.
pub const BEEP_CONFIG_MS: u32 = 50;

/// Buzzer pulse on the bright phase of the alarm blink.
pub const BEEP_ALARM_MS: u32 = 100;

/// Buzzer pulse acknowledging the reset button.
pub const BEEP_RESET_MS: u32 = 100;

/// Number of display pages the page-cycle button rotates through.
pub const PAGE_COUNT: u8 = 3;
