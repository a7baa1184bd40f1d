//! Typed, per-format entry points on [`IdGenerator`].
//!
//! Every format gets the same seven operations:
//!
//! | operation | returns |
//! |---|---|
//! | `generate_<f>` | the raw id in the format's container type |
//! | `generate_<f>_hex` | fixed-width lowercase hex |
//! | `generate_<f>_ascii` | fixed-width Crockford base32 |
//! | `extract_timestamp_<f>` | milliseconds since the Unix epoch |
//! | `extract_timestamp_<f>_hex` | same, from a hex string |
//! | `extract_timestamp_<f>_ascii` | same, from a base32 string |
//! | `decompose_<f>` | all three fields as [`IdParts`] |

use crate::{
    IdFormat, IdGenerator, IdParts, Result, TimeSource, WallClock,
    codec::{
        decode_ascii, decode_hex, decompose, encode_ascii, encode_hex, extract_timestamp,
        extract_timestamp_ascii, extract_timestamp_hex,
    },
};

macro_rules! generate_api {
    ($(
        $format:expr => $ty:ty {
            $generate:ident, $generate_hex:ident, $generate_ascii:ident
        }
    )*) => {
        impl<T> IdGenerator<T>
        where
            T: TimeSource,
        {
            $(
                #[doc = concat!("Generates the next `", stringify!($format), "` id.")]
                ///
                /// # Errors
                ///
                /// Returns [`Error::ClockRangeExceeded`](crate::Error::ClockRangeExceeded)
                /// if the clock is outside the format's range.
                #[allow(clippy::cast_possible_truncation)]
                pub fn $generate(&self) -> Result<$ty> {
                    // The layout never exceeds the container, so narrowing is lossless.
                    self.generate(&$format).map(|raw| raw as $ty)
                }

                #[doc = concat!("Generates the next `", stringify!($format), "` id as fixed-width hex.")]
                ///
                /// # Errors
                ///
                /// See the raw variant.
                pub fn $generate_hex(&self) -> Result<String> {
                    self.generate(&$format).map(|raw| encode_hex(&$format, raw))
                }

                #[doc = concat!("Generates the next `", stringify!($format), "` id as fixed-width Crockford base32.")]
                ///
                /// # Errors
                ///
                /// See the raw variant.
                pub fn $generate_ascii(&self) -> Result<String> {
                    self.generate(&$format).map(|raw| encode_ascii(&$format, raw))
                }
            )*
        }
    };
}

macro_rules! extract_api {
    ($(
        $format:expr => $ty:ty {
            $extract:ident, $extract_hex:ident, $extract_ascii:ident, $decompose:ident
        }
    )*) => {
        impl IdGenerator<WallClock> {
            $(
                #[doc = concat!("Milliseconds since the Unix epoch embedded in a `", stringify!($format), "` id.")]
                pub fn $extract(id: $ty) -> u64 {
                    extract_timestamp(&$format, u128::from(id))
                }

                #[doc = concat!("Milliseconds since the Unix epoch embedded in a hex `", stringify!($format), "` id.")]
                ///
                /// # Errors
                ///
                /// Returns [`Error::Decode`](crate::Error::Decode) for malformed input.
                pub fn $extract_hex(id: &str) -> Result<u64> {
                    Ok(extract_timestamp_hex(&$format, id)?)
                }

                #[doc = concat!("Milliseconds since the Unix epoch embedded in a base32 `", stringify!($format), "` id.")]
                ///
                /// # Errors
                ///
                /// Returns [`Error::Decode`](crate::Error::Decode) for malformed input.
                pub fn $extract_ascii(id: &str) -> Result<u64> {
                    Ok(extract_timestamp_ascii(&$format, id)?)
                }

                #[doc = concat!("Splits a `", stringify!($format), "` id into its fields.")]
                pub fn $decompose(id: $ty) -> IdParts {
                    decompose(&$format, u128::from(id))
                }
            )*
        }
    };
}

generate_api! {
    IdFormat::TINY => u32 { generate_tiny, generate_tiny_hex, generate_tiny_ascii }
    IdFormat::MINI => u64 { generate_mini, generate_mini_hex, generate_mini_ascii }
    IdFormat::ID48 => u64 { generate_id48, generate_id48_hex, generate_id48_ascii }
    IdFormat::ID64 => u64 { generate_id64, generate_id64_hex, generate_id64_ascii }
    IdFormat::ID128 => u128 { generate_id128, generate_id128_hex, generate_id128_ascii }
}

extract_api! {
    IdFormat::TINY => u32 {
        extract_timestamp_tiny, extract_timestamp_tiny_hex, extract_timestamp_tiny_ascii, decompose_tiny
    }
    IdFormat::MINI => u64 {
        extract_timestamp_mini, extract_timestamp_mini_hex, extract_timestamp_mini_ascii, decompose_mini
    }
    IdFormat::ID48 => u64 {
        extract_timestamp_id48, extract_timestamp_id48_hex, extract_timestamp_id48_ascii, decompose_id48
    }
    IdFormat::ID64 => u64 {
        extract_timestamp_id64, extract_timestamp_id64_hex, extract_timestamp_id64_ascii, decompose_id64
    }
    IdFormat::ID128 => u128 {
        extract_timestamp_id128, extract_timestamp_id128_hex, extract_timestamp_id128_ascii, decompose_id128
    }
}

impl IdGenerator<WallClock> {
    /// Decodes a hex id of `format` to its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::Error::Decode) for malformed input.
    pub fn decode_hex(format: &IdFormat, id: &str) -> Result<u128> {
        Ok(decode_hex(format, id)?)
    }

    /// Decodes a Crockford base32 id of `format` to its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::Error::Decode) for malformed input.
    pub fn decode_ascii(format: &IdFormat, id: &str) -> Result<u128> {
        Ok(decode_ascii(format, id)?)
    }
}
