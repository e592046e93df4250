use jiff::Timestamp;
use modular_bitfield::prelude::*;
use std::cmp::Ordering;
use std::fmt;

/// A 64-bit Snowflake ID.
///
/// Fields are declared from the least significant bit upwards, so the packed
/// `u64` reads, MSB to LSB:
///
/// ```text
/// 0 | 41 bits timestamp | 5 bits datacenter | 5 bits worker | 12 bits sequence
/// ```
///
/// The top bit is never written, which keeps every ID a non-negative `i64`.
#[bitfield]
#[repr(u64)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeId {
    /// 12 bits for the per-millisecond sequence.
    pub sequence: B12,
    /// 5 bits for the worker ID.
    pub worker_id: B5,
    /// 5 bits for the datacenter ID.
    pub datacenter_id: B5,
    /// 41 bits for milliseconds since the generator epoch.
    pub timestamp: B41,
    #[skip]
    __: B1,
}

impl SnowflakeId {
    /// Returns the raw packed value.
    pub fn to_u64(self) -> u64 {
        u64::from(self)
    }

    /// Reconstructs the instant this ID was issued, given the epoch of the
    /// generator that produced it.
    pub fn created_at(&self, epoch: Timestamp) -> Result<Timestamp, jiff::Error> {
        // the timestamp field is at most 41 bits, so it always fits in an i64
        Timestamp::from_millisecond(epoch.as_millisecond() + self.timestamp() as i64)
    }
}

impl PartialOrd for SnowflakeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SnowflakeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u64().cmp(&other.to_u64())
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}
