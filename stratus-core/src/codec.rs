//! Telemetry codec: wire-exact JSON out, positional JSON in
//!
//! ## Why not serde
//!
//! The wire format predates this implementation and clients depend on its
//! exact shape: scalars are fixed two-decimal fields, history and config
//! values fixed one-decimal, keys appear in a fixed order, and the config
//! *parser* is positional — it consumes the nine keys strictly
//! left-to-right and silently stops at the first mismatch, leaving the
//! remaining fields untouched while the HTTP layer still answers "OK".
//! A general-purpose serializer preserves none of that, so the codec is
//! built by hand on `heapless::String` and `core::fmt::Write`.
//!
//! ## Documents
//!
//! Telemetry (`GET /api/data`):
//! ```json
//! {"temperature":23.51,"humidity":48.20,"pressure":1002.10,"altitude":93.40,
//!  "history":{"temperature":[23.5],"humidity":[48.2],"pressure":[1002.1]},
//!  "alert":"Values out of configured limits!"}
//! ```
//! The `alert` field is entirely absent (not null) while no alarm is active.
//!
//! Config (`GET /api/config` body, and the expected `POST` body):
//! ```json
//! {"temp_min":10.0,"temp_max":35.0,"humid_min":20.0,"humid_max":80.0,
//!  "press_min":900.0,"press_max":1100.0,"temp_offset":0.0,
//!  "humid_offset":0.0,"press_offset":0.0}
//! ```

use core::fmt::{self, Write};

use crate::config::Config;
use crate::history::HistoryRing;
use crate::reading::Reading;

/// Fixed alert message included in telemetry while an alarm is active.
pub const ALERT_MESSAGE: &str = "Values out of configured limits!";

/// Append `value` with exactly `decimals` fractional digits, printf-style.
///
/// Rounds half away from zero and keeps the sign of a negative zero, so
/// `-0.04` at one decimal prints `-0.0` just like `printf("%.1f")`.
/// Non-finite values never reach the codec from the sensor path.
fn write_fixed<W: Write>(out: &mut W, value: f32, decimals: u32) -> fmt::Result {
    let scale = 10i64.pow(decimals) as f32;
    let scaled = libm::roundf(value * scale);
    let negative = scaled.is_sign_negative();
    let magnitude = libm::fabsf(scaled) as i64;

    if negative {
        out.write_char('-')?;
    }
    let whole = magnitude / 10i64.pow(decimals);
    write!(out, "{whole}")?;
    if decimals > 0 {
        let frac = magnitude % 10i64.pow(decimals);
        write!(out, ".{frac:0width$}", width = decimals as usize)?;
    }
    Ok(())
}

/// Build the live telemetry document into `out`.
///
/// Scalars carry two decimals, the history arrays one. History arrays are
/// oldest→newest, exactly the ring's snapshot order.
pub fn write_telemetry<W: Write, const N: usize>(
    out: &mut W,
    reading: &Reading,
    history: &HistoryRing<N>,
    alarm_active: bool,
) -> fmt::Result {
    out.write_str("{\"temperature\":")?;
    write_fixed(out, reading.temperature, 2)?;
    out.write_str(",\"humidity\":")?;
    write_fixed(out, reading.humidity, 2)?;
    out.write_str(",\"pressure\":")?;
    write_fixed(out, reading.pressure, 2)?;
    out.write_str(",\"altitude\":")?;
    write_fixed(out, reading.altitude, 2)?;

    out.write_str(",\"history\":{\"temperature\":")?;
    write_channel(out, history.snapshot().map(|s| s.temperature))?;
    out.write_str(",\"humidity\":")?;
    write_channel(out, history.snapshot().map(|s| s.humidity))?;
    out.write_str(",\"pressure\":")?;
    write_channel(out, history.snapshot().map(|s| s.pressure))?;
    out.write_str("}")?;

    if alarm_active {
        out.write_str(",\"alert\":\"")?;
        out.write_str(ALERT_MESSAGE)?;
        out.write_str("\"")?;
    }
    out.write_str("}")
}

fn write_channel<W: Write>(out: &mut W, values: impl Iterator<Item = f32>) -> fmt::Result {
    out.write_char('[')?;
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write_fixed(out, value, 1)?;
    }
    out.write_char(']')
}

/// Build the configuration document into `out`: nine keys, wire order,
/// one decimal each.
pub fn write_config<W: Write>(out: &mut W, config: &Config) -> fmt::Result {
    out.write_char('{')?;
    for (i, (key, value)) in Config::KEYS.iter().zip(config.values()).enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write!(out, "\"{key}\":")?;
        write_fixed(out, value, 1)?;
    }
    out.write_char('}')
}

/// Apply a configuration document to `config`, positionally.
///
/// Expects the nine keys in wire order with exact punctuation. Each field
/// is written the moment it matches; the walk stops silently at the first
/// literal or number that fails to match, leaving later fields unmodified.
/// Returns how many fields were applied — callers treat this as
/// informational only and never surface an error.
pub fn parse_config(body: &[u8], config: &mut Config) -> usize {
    let mut cursor = Cursor { data: body, pos: 0 };
    let mut applied = 0;

    for (i, field) in config.fields_mut().into_iter().enumerate() {
        let lead = if i == 0 { "{\"" } else { ",\"" };
        if !cursor.literal(lead.as_bytes())
            || !cursor.literal(Config::KEYS[i].as_bytes())
            || !cursor.literal(b"\":")
        {
            break;
        }
        match cursor.number() {
            Some(value) => {
                *field = value;
                applied += 1;
            }
            None => break,
        }
    }
    applied
}

/// Byte cursor with sscanf-like matching: literals byte-for-byte, numbers
/// with leading whitespace skipped.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn literal(&mut self, expected: &[u8]) -> bool {
        let end = self.pos + expected.len();
        if self.data.len() >= end && &self.data[self.pos..end] == expected {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Option<f32> {
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        let mut end = self.pos;
        let mut seen_digit = false;

        if end < self.data.len() && matches!(self.data[end], b'+' | b'-') {
            end += 1;
        }
        while end < self.data.len() && self.data[end].is_ascii_digit() {
            end += 1;
            seen_digit = true;
        }
        if end < self.data.len() && self.data[end] == b'.' {
            end += 1;
            while end < self.data.len() && self.data[end].is_ascii_digit() {
                end += 1;
                seen_digit = true;
            }
        }
        if seen_digit && end < self.data.len() && matches!(self.data[end], b'e' | b'E') {
            let mut exp = end + 1;
            if exp < self.data.len() && matches!(self.data[exp], b'+' | b'-') {
                exp += 1;
            }
            let digits = exp;
            while exp < self.data.len() && self.data[exp].is_ascii_digit() {
                exp += 1;
            }
            if exp > digits {
                end = exp;
            }
        }
        if !seen_digit {
            return None;
        }

        let text = core::str::from_utf8(&self.data[start..end]).ok()?;
        let value = text.parse::<f32>().ok()?;
        self.pos = end;
        Some(value)
    }
}
