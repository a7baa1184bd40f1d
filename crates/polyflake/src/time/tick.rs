use crate::{TimeSource, WallClock};

/// Quantizes a [`TimeSource`] into ticks of a given resolution.
///
/// A tick is `current_millis / resolution_millis`. The clock holds no mutable
/// state, so one `TickClock` can serve every thread and format at once.
///
/// A resolution of zero is treated as one millisecond.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickClock<T = WallClock> {
    source: T,
}

impl<T> TickClock<T>
where
    T: TimeSource,
{
    pub const fn new(source: T) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &T {
        &self.source
    }

    /// Returns the current tick at `resolution_millis`.
    pub fn now(&self, resolution_millis: u64) -> u64 {
        self.source.current_millis() / resolution_millis.max(1)
    }

    /// Blocks until the tick at `resolution_millis` is strictly greater than
    /// `tick`, then returns the new tick.
    ///
    /// The calling thread parks until the first millisecond of `tick + 1`
    /// rather than spinning. If the underlying clock stepped backward the wait
    /// simply lasts longer; the returned tick is never `<= tick`.
    ///
    /// The wait is not cancellable. Under a steady clock it lasts at most one
    /// tick.
    pub fn wait_until_next(&self, tick: u64, resolution_millis: u64) -> u64 {
        let resolution = resolution_millis.max(1);
        let boundary = tick.saturating_add(1).saturating_mul(resolution);

        loop {
            let millis = self.source.current_millis();
            let now = millis / resolution;
            if now > tick {
                return now;
            }
            self.source.park(boundary.saturating_sub(millis).max(1));
        }
    }

    /// Blocks until the millisecond clock passes `millis`.
    pub fn wait_till_next_millisec(&self, millis: u64) -> u64 {
        self.wait_until_next(millis, 1)
    }

    /// Blocks until the clock passes the second `secs` and returns the new
    /// second.
    pub fn wait_till_next_second(&self, secs: u64) -> u64 {
        self.wait_until_next(secs, 1_000)
    }

    /// Blocks until the tick of size `tick_size` milliseconds passes `tick`.
    pub fn wait_till_next_tick(&self, tick: u64, tick_size: u64) -> u64 {
        self.wait_until_next(tick, tick_size)
    }
}

/// Blocks until the wall clock passes the millisecond `millis` and returns the
/// new millisecond.
pub fn wait_till_next_millisec(millis: u64) -> u64 {
    TickClock::new(WallClock).wait_till_next_millisec(millis)
}

/// Blocks until the wall clock passes the second `secs` (since the Unix epoch)
/// and returns the new second.
pub fn wait_till_next_second(secs: u64) -> u64 {
    TickClock::new(WallClock).wait_till_next_second(secs)
}

/// Blocks until the wall clock's tick of size `tick_size` milliseconds passes
/// `tick` and returns the new tick.
pub fn wait_till_next_tick(tick: u64, tick_size: u64) -> u64 {
    TickClock::new(WallClock).wait_till_next_tick(tick, tick_size)
}
