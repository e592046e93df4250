use crate::{
    clock::{Clock, SystemClock},
    error::{Coordinate, Error},
    SnowflakeId,
};
use jiff::Timestamp;
use std::sync::Mutex;
use tracing::{debug, error, trace, warn};
use typed_builder::TypedBuilder;

pub const TIMESTAMP_BITS: u32 = 41;
pub const DATACENTER_ID_BITS: u32 = 5;
pub const WORKER_ID_BITS: u32 = 5;
pub const SEQUENCE_BITS: u32 = 12;

pub const MAX_TIMESTAMP: i64 = (1_i64 << TIMESTAMP_BITS) - 1;
pub const MAX_DATACENTER_ID: u8 = (1_u8 << DATACENTER_ID_BITS) - 1;
pub const MAX_WORKER_ID: u8 = (1_u8 << WORKER_ID_BITS) - 1;
pub const MAX_SEQUENCE: u16 = (1_u16 << SEQUENCE_BITS) - 1;

/// 2025-01-01T00:00:00+08:00
pub const DEFAULT_EPOCH: Timestamp = Timestamp::constant(1_735_660_800, 0);

/// Configures a Snowflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct SnowflakeSettings {
    /// Worker index in the range `[0, 31]`.
    #[builder]
    pub worker_id: u8,
    /// Datacenter index in the range `[0, 31]`.
    #[builder]
    pub datacenter_id: u8,
    /// Zero point of the 41-bit millisecond timestamp field.
    ///
    /// Sub-millisecond precision of the epoch is ignored.
    #[builder(default = DEFAULT_EPOCH)]
    pub epoch: Timestamp,
}

#[derive(Debug, Default)]
struct GeneratorState {
    /// Unix millisecond of the most recently issued ID. `None` until the
    /// first ID is issued.
    last_millisecond: Option<i64>,
    sequence: u16,
}

/// Snowflake ID generator.
///
/// One instance owns one `(datacenter, worker)` coordinate. All calls to
/// [`Snowflake::next_id`] are serialized on a single lock, so IDs from one
/// instance are strictly increasing in issuance order.
pub struct Snowflake<C: Clock> {
    epoch: Timestamp,
    epoch_millisecond: i64,
    datacenter_id: u8,
    worker_id: u8,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl Snowflake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: SnowflakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Snowflake<C> {
    /// Creates a generator that reads time from `clock`.
    pub fn with_clock(settings: SnowflakeSettings, clock: C) -> Result<Self, Error> {
        if settings.datacenter_id > MAX_DATACENTER_ID {
            return Err(Error::InvalidCoordinate {
                coordinate: Coordinate::Datacenter,
                value: settings.datacenter_id,
                max: MAX_DATACENTER_ID,
            });
        }
        if settings.worker_id > MAX_WORKER_ID {
            return Err(Error::InvalidCoordinate {
                coordinate: Coordinate::Worker,
                value: settings.worker_id,
                max: MAX_WORKER_ID,
            });
        }

        debug!(
            datacenter_id = settings.datacenter_id,
            worker_id = settings.worker_id,
            epoch = %settings.epoch,
            "snowflake generator initialized"
        );

        Ok(Self {
            epoch: settings.epoch,
            epoch_millisecond: settings.epoch.as_millisecond(),
            datacenter_id: settings.datacenter_id,
            worker_id: settings.worker_id,
            clock,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    pub fn datacenter_id(&self) -> u8 {
        self.datacenter_id
    }

    pub fn worker_id(&self) -> u8 {
        self.worker_id
    }

    /// Generates the next unique ID as its raw 64-bit value.
    pub fn next_u64(&self) -> Result<u64, Error> {
        self.next_id().map(SnowflakeId::to_u64)
    }

    /// Generates the next unique SnowflakeId.
    ///
    /// - if the clock reads earlier than the last issued ID, fail with
    ///   [`Error::ClockMovedBackwards`]
    /// - if the per-millisecond sequence is exhausted, wait for the next
    ///   millisecond and restart the sequence at zero
    pub fn next_id(&self) -> Result<SnowflakeId, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let now = self.clock.now().as_millisecond();

        if let Some(last) = state.last_millisecond {
            if now < last {
                warn!(
                    last_ms = last,
                    now_ms = now,
                    datacenter_id = self.datacenter_id,
                    worker_id = self.worker_id,
                    "clock moved backwards, refusing to generate id"
                );
                return Err(Error::ClockMovedBackwards { last, now });
            }
        }

        let (now, sequence) = match state.last_millisecond {
            Some(last) if now == last => match (state.sequence + 1) & MAX_SEQUENCE {
                0 => {
                    // Per-millisecond sequence exhausted: hold the lock until
                    // the clock ticks over so no caller can reuse this slot.
                    trace!(last_ms = last, "sequence exhausted, waiting for next millisecond");
                    (self.wait_next_millisecond(last)?, 0)
                }
                sequence => (now, sequence),
            },
            // First ID, or a new millisecond: the sequence restarts.
            _ => (now, 0),
        };
        let elapsed = self.elapsed_since_epoch(now)?;

        // Commit only once every check has passed.
        state.last_millisecond = Some(now);
        state.sequence = sequence;

        Ok(SnowflakeId::new()
            .with_timestamp(elapsed as u64)
            .with_datacenter_id(self.datacenter_id)
            .with_worker_id(self.worker_id)
            .with_sequence(sequence))
    }

    /// Milliseconds between the epoch and `now`, checked against the width of
    /// the timestamp field.
    fn elapsed_since_epoch(&self, now: i64) -> Result<i64, Error> {
        let elapsed = now - self.epoch_millisecond;
        if elapsed < 0 {
            return Err(Error::BeforeEpoch {
                epoch: self.epoch_millisecond,
                now,
            });
        }
        if elapsed > MAX_TIMESTAMP {
            error!(
                elapsed_ms = elapsed,
                max_ms = MAX_TIMESTAMP,
                "timestamp field exhausted for configured epoch"
            );
            return Err(Error::TimestampOverflow {
                elapsed,
                max: MAX_TIMESTAMP,
            });
        }
        Ok(elapsed)
    }

    fn wait_next_millisecond(&self, last: i64) -> Result<i64, Error> {
        let target = Timestamp::from_millisecond(last + 1).map_err(|_| Error::TimestampOverflow {
            elapsed: last + 1 - self.epoch_millisecond,
            max: MAX_TIMESTAMP,
        })?;
        loop {
            let now = self.clock.now().as_millisecond();
            if now > last {
                return Ok(now);
            }
            if now < last {
                // A step back mid-wait would otherwise keep the lock held
                // until the clock catches up again.
                warn!(
                    last_ms = last,
                    now_ms = now,
                    datacenter_id = self.datacenter_id,
                    worker_id = self.worker_id,
                    "clock moved backwards while waiting for next millisecond"
                );
                return Err(Error::ClockMovedBackwards { last, now });
            }
            self.clock.wait_until(target);
        }
    }
}
