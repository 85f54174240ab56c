use std::sync::atomic::{AtomicU64, Ordering};

static LAST_MILLIS: AtomicU64 = AtomicU64::new(0);

pub struct Timestamp;

impl Timestamp {
    /// Returns milliseconds since UNIX epoch, clamped so that consecutive calls
    /// never go backwards even if the browser clock is adjusted.
    pub fn now_millis() -> u64 {
        let wall = js_sys::Date::now().max(0.0) as u64;
        let previous = LAST_MILLIS.fetch_max(wall, Ordering::Relaxed);
        wall.max(previous)
    }
}
