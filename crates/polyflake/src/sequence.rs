use core::cmp::Ordering;

/// Returned by [`SequenceState::next`] when no id can be issued at the given
/// tick. The caller must wait for a tick past [`SequenceState::last_tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SequenceOverflow;

/// The `(last_tick, sequence)` pair for one node and one format.
///
/// Accepted pairs strictly increase in lexicographic order, which is the only
/// thing standing between concurrent callers and duplicate ids. Callers must
/// hold the state's lock across [`Self::next`] and the packing that follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SequenceState {
    last_tick: Option<u64>,
    sequence: u64,
}

impl SequenceState {
    /// A state that has never issued an id. Any tick is accepted next.
    pub(crate) const fn new() -> Self {
        Self {
            last_tick: None,
            sequence: 0,
        }
    }

    #[cfg(test)]
    pub(crate) const fn from_components(last_tick: u64, sequence: u64) -> Self {
        Self {
            last_tick: Some(last_tick),
            sequence,
        }
    }

    pub(crate) const fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    /// Claims the next sequence number at `current_tick`.
    ///
    /// - a newer tick resets the sequence to zero;
    /// - the same tick increments it, unless that would pass `max_sequence`;
    /// - an older tick (the clock went backward) is refused.
    ///
    /// Refusals leave the state untouched.
    pub(crate) fn next(
        &mut self,
        current_tick: u64,
        max_sequence: u64,
    ) -> Result<u64, SequenceOverflow> {
        let Some(last_tick) = self.last_tick else {
            return Ok(self.rollover(current_tick));
        };

        match current_tick.cmp(&last_tick) {
            Ordering::Greater => Ok(self.rollover(current_tick)),
            Ordering::Equal if self.sequence < max_sequence => {
                self.sequence += 1;
                Ok(self.sequence)
            }
            Ordering::Equal | Ordering::Less => Err(SequenceOverflow),
        }
    }

    fn rollover(&mut self, tick: u64) -> u64 {
        self.last_tick = Some(tick);
        self.sequence = 0;
        0
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::new()
    }
}
