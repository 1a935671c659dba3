//! Fixed-size ring buffer for the rolling telemetry history
//!
//! ## Overview
//!
//! The node keeps the last `N` readings so the dashboard can chart a live
//! window without the node persisting anything. The buffer is a classic
//! ring with a write cursor and a saturating count, sized at compile time
//! through a const generic — no heap, no reallocation, overwrite-in-place
//! forever.
//!
//! ## Layout
//!
//! The three channels are stored as parallel `f32` arrays rather than an
//! array of structs: the telemetry codec emits each channel as its own JSON
//! array, so iteration is per-channel on the hot path.
//!
//! ```text
//! HistoryRing<5> after 7 pushes (index = 2, count = 5):
//!
//! physical:  [ s5, s6, s2, s3, s4 ]
//!                    ↑
//!                  index (next write)
//!
//! logical:   [ s2, s3, s4, s5, s6 ]   oldest → newest,
//!                                     starts at (index - count + N) % N
//! ```
//!
//! Entries beyond `count` are zero-initialized and never observable through
//! the snapshot iterator.

/// One stored history sample: offset-adjusted channel values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Calibrated temperature, °C
    pub temperature: f32,
    /// Calibrated humidity, %RH
    pub humidity: f32,
    /// Calibrated pressure, hPa
    pub pressure: f32,
}

/// Bounded circular store of the most recent `N` readings.
///
/// ## Invariants
///
/// - `index < N` (next write slot is always valid)
/// - `count <= N`, monotone until saturation, never shrinks
/// - snapshot order is oldest→newest, starting `(index - count + N) % N`
#[derive(Clone)]
pub struct HistoryRing<const N: usize> {
    temperature: [f32; N],
    humidity: [f32; N],
    pressure: [f32; N],
    /// Next write position, wraps at N
    index: usize,
    /// Number of valid entries, saturates at N
    count: usize,
}

impl<const N: usize> HistoryRing<N> {
    /// Creates an empty ring. Const so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            temperature: [0.0; N],
            humidity: [0.0; N],
            pressure: [0.0; N],
            index: 0,
            count: 0,
        }
    }

    /// Record one reading. O(1), never fails; when full the oldest entry
    /// is overwritten.
    pub fn push(&mut self, temperature: f32, humidity: f32, pressure: f32) {
        self.temperature[self.index] = temperature;
        self.humidity[self.index] = humidity;
        self.pressure[self.index] = pressure;

        self.index = (self.index + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Number of valid entries.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True until the first push.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True once `N` entries have been pushed.
    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Lazy oldest→newest walk over the valid entries.
    ///
    /// Does not mutate the ring; restartable by calling again.
    pub fn snapshot(&self) -> Snapshot<'_, N> {
        Snapshot { ring: self, pos: 0 }
    }

    /// Translate a logical index (0 = oldest) to a physical slot.
    fn slot(&self, logical: usize) -> usize {
        (self.index + N - self.count + logical) % N
    }
}

impl<const N: usize> Default for HistoryRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`HistoryRing`], oldest to newest.
pub struct Snapshot<'a, const N: usize> {
    ring: &'a HistoryRing<N>,
    pos: usize,
}

impl<const N: usize> Iterator for Snapshot<'_, N> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.ring.count {
            return None;
        }
        let slot = self.ring.slot(self.pos);
        self.pos += 1;
        Some(Sample {
            temperature: self.ring.temperature[slot],
            humidity: self.ring.humidity[slot],
            pressure: self.ring.pressure[slot],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.count - self.pos;
        (remaining, Some(remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Snapshot<'_, N> {}
