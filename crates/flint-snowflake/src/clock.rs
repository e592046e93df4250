use jiff::Timestamp;

/// A source of wall-clock time for a [`Snowflake`](crate::Snowflake) generator.
pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
    /// Block and wait until the clock reaches the target time.
    ///
    /// Returns early if the clock is seen moving backwards, so callers must
    /// re-read [`Clock::now`] afterwards.
    fn wait_until(&self, target: Timestamp);
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // The generator only ever waits for the next millisecond, so the gap
        // is sub-millisecond under a healthy clock. Spin, but yield the
        // timeslice between polls so other threads can make progress.
        let mut previous = Timestamp::now();
        while previous < target {
            std::thread::yield_now();
            let now = Timestamp::now();
            if now < previous {
                return;
            }
            previous = now;
        }
    }
}
