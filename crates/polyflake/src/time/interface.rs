use std::{
    sync::Arc,
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// This abstraction allows you to plug in the system clock, a monotonic
/// ticker, or a mocked time source in tests. Generators never trust a single
/// reading to be monotonic; they gate acceptance on their own last tick.
///
/// # Example
///
/// ```
/// use polyflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;

    /// Blocks the calling thread for roughly `millis` milliseconds.
    ///
    /// Used while waiting for the next tick. Virtual clocks override this to
    /// advance their own time instead of sleeping.
    fn park(&self, millis: u64) {
        thread::sleep(Duration::from_millis(millis));
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }

    fn park(&self, millis: u64) {
        (**self).park(millis);
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }

    fn park(&self, millis: u64) {
        (**self).park(millis);
    }
}

/// The system wall clock.
///
/// Reads `SystemTime::now()` on every call, so it follows NTP steps in both
/// directions. A clock set before 1970 reads as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// Milliseconds since the Unix epoch according to the [`WallClock`].
pub fn now_millis() -> u64 {
    WallClock.current_millis()
}
