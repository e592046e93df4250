use std::fmt;
use thiserror::Error;

/// Which half of a generator's `(datacenter, worker)` coordinate is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coordinate {
    Datacenter,
    Worker,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Datacenter => write!(f, "datacenter id"),
            Coordinate::Worker => write!(f, "worker id"),
        }
    }
}

/// Errors returned by Snowflake initialization and ID generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid {coordinate} {value}; expected 0..={max}")]
    InvalidCoordinate {
        coordinate: Coordinate,
        value: u8,
        max: u8,
    },
    #[error("clock moved backwards: last={last}ms, now={now}ms; refusing to generate id")]
    ClockMovedBackwards { last: i64, now: i64 },
    #[error("timestamp out of range: {elapsed}ms since epoch exceeds {max}ms")]
    TimestampOverflow { elapsed: i64, max: i64 },
    #[error("clock is behind the epoch: epoch={epoch}ms, now={now}ms")]
    BeforeEpoch { epoch: i64, now: i64 },
    #[error("generator state lock is poisoned")]
    StatePoisoned,
}
