use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, IdFormat, Result, TickClock, TimeSource, WallClock,
    sequence::{SequenceOverflow, SequenceState},
};

const FORMAT_COUNT: usize = IdFormat::ALL.len();

/// A thread-safe generator for one node id, covering every [`IdFormat`].
///
/// Each format has its own sequence state behind its own (cache-padded)
/// mutex, so callers generating different widths never contend with each
/// other. Within one format the lock is held for the whole claim-and-pack
/// step, including any wait for the next tick.
///
/// Generators are normally obtained from a [`Registry`] so that every caller
/// in the process asking for a node id shares one instance. Building two
/// generators for the same node id by hand and using them concurrently
/// produces duplicates.
///
/// ## See Also
/// - [`Registry`]
/// - [`IdGenerator::get_instance`]
///
/// [`Registry`]: crate::Registry
#[derive(Debug)]
pub struct IdGenerator<T = WallClock>
where
    T: TimeSource,
{
    node_id: u64,
    states: [CachePadded<Mutex<SequenceState>>; FORMAT_COUNT],
    clock: TickClock<T>,
}

impl<T> IdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a standalone generator for `node_id`.
    ///
    /// The generator is not registered anywhere; prefer
    /// [`Registry::instance`](crate::Registry::instance) unless you control
    /// every generator for this node id in the process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if `node_id` exceeds
    /// [`IdFormat::MAX_NODE_ID`].
    ///
    /// # Example
    /// ```
    /// use polyflake::{IdGenerator, WallClock};
    ///
    /// let generator = IdGenerator::new(7, WallClock).unwrap();
    /// let a = generator.generate_id64().unwrap();
    /// let b = generator.generate_id64().unwrap();
    /// assert!(b > a);
    /// ```
    pub fn new(node_id: u64, time: T) -> Result<Self> {
        validate_node_id(node_id).map(|node_id| Self::new_unchecked(node_id, time))
    }

    pub(crate) fn new_unchecked(node_id: u64, time: T) -> Self {
        debug_assert!(node_id <= IdFormat::MAX_NODE_ID);
        Self {
            node_id,
            states: core::array::from_fn(|_| CachePadded::new(Mutex::new(SequenceState::new()))),
            clock: TickClock::new(time),
        }
    }

    /// The node id this generator embeds, before any per-format masking.
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The value written into `format`'s node field.
    pub const fn node_field(&self, format: &IdFormat) -> u64 {
        self.node_id & format.max_node_id()
    }

    pub const fn clock(&self) -> &TickClock<T> {
        &self.clock
    }

    /// Generates the next raw id of `format`, widened to `u128`.
    ///
    /// If the current tick's sequence space is used up, or the clock reads
    /// earlier than the last tick this generator accepted, the call blocks
    /// until the next tick (at most one tick under a steady clock).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRangeExceeded`] if the tick about to be used is
    /// before the format's epoch or past the last tick its timestamp field
    /// can hold. A clock behind a tick this generator already accepted waits
    /// instead, wherever it reads.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self), fields(node_id = self.node_id))
    )]
    pub fn generate(&self, format: &IdFormat) -> Result<u128> {
        let mut state = self.states[format.slot()].lock();
        let mut tick = self.clock.now(format.tick_millis());

        // Waiting under the lock means the retry after a wait always lands on
        // a fresh tick, so this loops at most twice.
        let raw = loop {
            // A clock behind the last accepted tick only costs wait time, even
            // when it reads before the epoch.
            if let Some(last_tick) = state.last_tick().filter(|last| tick < *last) {
                tick = self.cold_wait_for_next_tick(format, last_tick);
                continue;
            }

            let timestamp = Self::timestamp_field(format, tick)?;
            match state.next(tick, format.max_sequence()) {
                Ok(sequence) => break format.pack(timestamp, self.node_id, sequence),
                Err(SequenceOverflow) => {
                    let last_tick = state.last_tick().unwrap_or(tick);
                    tick = self.cold_wait_for_next_tick(format, last_tick);
                }
            }
        };

        Ok(raw)
    }

    fn timestamp_field(format: &IdFormat, tick: u64) -> Result<u64> {
        tick.checked_sub(format.epoch_tick())
            .filter(|timestamp| *timestamp <= format.max_timestamp())
            .ok_or(Error::ClockRangeExceeded {
                format: format.name(),
                tick,
            })
    }

    #[cold]
    #[inline(never)]
    fn cold_wait_for_next_tick(&self, format: &IdFormat, last_tick: u64) -> u64 {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            format = format.name(),
            node_id = self.node_id,
            last_tick,
            "sequence exhausted or clock behind, waiting for next tick"
        );
        self.clock.wait_until_next(last_tick, format.tick_millis())
    }
}

pub(crate) fn validate_node_id(node_id: u64) -> Result<u64> {
    if node_id > IdFormat::MAX_NODE_ID {
        return Err(Error::InvalidNodeId {
            node_id,
            max: IdFormat::MAX_NODE_ID,
        });
    }
    Ok(node_id)
}
