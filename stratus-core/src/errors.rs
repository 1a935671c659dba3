//! Error types for the monitoring node
//!
//! ## Design
//!
//! Every failure in this system is absorbed, not propagated to a caller who
//! could do anything about it: a failed sensor read skips the tick, an
//! overfull connection drops, a dead network leaves the node running
//! standalone. The error enum therefore stays small and `Copy` — it exists
//! so the skip/drop sites can log *which* failure was absorbed, and so the
//! scheduler's internals can use `?` instead of ad-hoc booleans.
//!
//! No variant carries heap data; messages are `&'static str` or inline
//! numbers only.

use thiserror_no_std::Error;

/// Result type for station operations
pub type StationResult<T> = Result<T, StationError>;

/// Station errors - kept small, every one is absorbed at the tick boundary
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationError {
    /// The climate sensor had no data ready; the whole update is skipped
    /// for this tick and the last reading/history are retained.
    #[error("climate sensor not ready, tick skipped")]
    SensorUnavailable,

    /// The per-connection response buffer could not hold the response.
    /// The connection is dropped without a reply.
    #[error("response of {needed} bytes exceeds connection buffer")]
    ConnFull {
        /// Bytes the framed response would have needed
        needed: usize,
    },

    /// The network stack never came up; the HTTP server does not start and
    /// the node keeps operating standalone.
    #[error("network unavailable: {reason}")]
    NetDown {
        /// Stack-specific reason, surfaced on the local display only
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for StationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorUnavailable => defmt::write!(fmt, "sensor not ready"),
            Self::ConnFull { needed } => defmt::write!(fmt, "response too large: {}", needed),
            Self::NetDown { reason } => defmt::write!(fmt, "network down: {}", reason),
        }
    }
}
