//! Snowflake-style 64-bit ID generation.
//!
//! A [`Snowflake`] generator packs a 41-bit millisecond timestamp, a 5-bit
//! datacenter ID, a 5-bit worker ID and a 12-bit per-millisecond sequence into
//! a non-negative `u64`. IDs from one generator are strictly increasing; IDs
//! from generators with distinct `(datacenter, worker)` pairs never collide.

mod clock;
pub mod error;
mod snowflake;
mod snowflake_id;

pub use clock::{Clock, SystemClock};
pub use error::{Coordinate, Error};
pub use snowflake::{
    Snowflake, SnowflakeSettings, DATACENTER_ID_BITS, DEFAULT_EPOCH, MAX_DATACENTER_ID,
    MAX_SEQUENCE, MAX_TIMESTAMP, MAX_WORKER_ID, SEQUENCE_BITS, TIMESTAMP_BITS, WORKER_ID_BITS,
};
pub use snowflake_id::SnowflakeId;
