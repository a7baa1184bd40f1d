use crate::codec::DecodeError;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `polyflake` can surface to a caller.
///
/// Sequence exhaustion within a tick is not an error: it is absorbed by the
/// generator, which blocks until the next tick instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The clock is outside the range the format's timestamp field can hold,
    /// either before the format's epoch or past its last representable tick.
    ///
    /// This is fatal for the format: retrying cannot succeed until the epoch
    /// is redefined.
    #[error("clock tick {tick} is outside the timestamp range of the {format} format")]
    ClockRangeExceeded {
        /// Name of the format that could not hold the tick.
        format: &'static str,
        /// The tick (in the format's resolution) that was rejected.
        tick: u64,
    },

    /// The requested node id does not fit the widest node field.
    #[error("node id {node_id} is out of range (max = {max})")]
    InvalidNodeId {
        /// The rejected node id.
        node_id: u64,
        /// The largest node id accepted.
        max: u64,
    },

    /// A hex or ascii encoded id could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
