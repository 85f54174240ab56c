use std::{sync::OnceLock, time::Instant};

static CLOCK_EPOCH: OnceLock<Instant> = OnceLock::new();

pub struct Timestamp;

impl Timestamp {
    /// Returns milliseconds elapsed on a monotonic clock since the first call
    /// made in this process.
    ///
    /// Values never decrease, so they are safe to use as `Pose` timestamps and
    /// as the `now_ms` argument of every tick-driven operation.
    pub fn now_millis() -> u64 {
        let epoch = CLOCK_EPOCH.get_or_init(Instant::now);
        epoch.elapsed().as_millis() as u64
    }
}
