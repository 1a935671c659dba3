//! Monotonic clock abstraction
//!
//! The scheduler only needs milliseconds since boot, monotone
//! non-decreasing. Firmware backs this with a hardware timer; tests script
//! it with [`FixedClock`]; the simulator uses [`StdClock`].

/// Milliseconds since boot.
pub type Millis = u64;

/// Source of monotonic time.
pub trait Clock {
    /// Current time in milliseconds since boot.
    fn now_ms(&self) -> Millis;
}

/// Scripted clock for tests: advances only when told to.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Millis,
}

impl FixedClock {
    /// Clock starting at `now` milliseconds.
    pub const fn new(now: Millis) -> Self {
        Self { now }
    }

    /// Jump to an absolute time.
    pub fn set(&mut self, now: Millis) {
        self.now = now;
    }

    /// Move forward by `ms`.
    pub fn advance(&mut self, ms: Millis) {
        self.now += ms;
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> Millis {
        self.now
    }
}

/// Wall-process clock for the host simulator (std only).
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Clock anchored at construction time.
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}
