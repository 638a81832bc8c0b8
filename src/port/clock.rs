//! Wall-clock port.

/// Source of the current time used for oracle freshness checks.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn now_unix_secs(&self) -> i64;
}

/// System time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}
