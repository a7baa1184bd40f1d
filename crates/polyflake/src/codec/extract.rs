use crate::{
    IdFormat,
    codec::{DecodeError, decode_ascii, decode_hex},
};

/// The three fields of a raw id, with the timestamp converted back to wall
/// clock milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdParts {
    /// Start of the tick the id was generated in, in milliseconds since the
    /// Unix epoch.
    pub timestamp_millis: u64,
    /// The node field. For narrow formats this is the node id masked to the
    /// field width.
    pub node_id: u64,
    pub sequence: u64,
}

/// Recovers the generation time of `raw` in milliseconds since the Unix
/// epoch.
///
/// The result is the first millisecond of the id's tick, so it trails the
/// actual generation time by less than [`IdFormat::tick_millis`].
pub fn extract_timestamp(format: &IdFormat, raw: u128) -> u64 {
    format
        .timestamp(raw)
        .saturating_add(format.epoch_tick())
        .saturating_mul(format.tick_millis())
}

/// [`extract_timestamp`] for a hex encoded id.
///
/// # Errors
///
/// Returns a [`DecodeError`] if `encoded` is not a valid hex id of `format`.
pub fn extract_timestamp_hex(format: &IdFormat, encoded: &str) -> Result<u64, DecodeError> {
    decode_hex(format, encoded).map(|raw| extract_timestamp(format, raw))
}

/// [`extract_timestamp`] for a Crockford base32 encoded id.
///
/// # Errors
///
/// Returns a [`DecodeError`] if `encoded` is not a valid ascii id of `format`.
pub fn extract_timestamp_ascii(format: &IdFormat, encoded: &str) -> Result<u64, DecodeError> {
    decode_ascii(format, encoded).map(|raw| extract_timestamp(format, raw))
}

/// Splits `raw` into its fields.
pub fn decompose(format: &IdFormat, raw: u128) -> IdParts {
    IdParts {
        timestamp_millis: extract_timestamp(format, raw),
        node_id: format.node_id(raw),
        sequence: format.sequence(raw),
    }
}
