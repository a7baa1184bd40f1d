use crate::{IdFormat, codec::DecodeError};

/// Encodes `raw` as lowercase hex, zero-padded to [`IdFormat::hex_len`].
///
/// The encoding is positional: the digits are exactly the bits of the raw
/// integer, so fixed-width strings of one format sort like the ids do.
pub fn encode_hex(format: &IdFormat, raw: u128) -> String {
    debug_assert!(format.fits(raw), "raw id wider than {format}");
    format!("{raw:0width$x}", width = format.hex_len())
}

/// Decodes a fixed-width hex string produced by [`encode_hex`]. Either case is
/// accepted.
///
/// # Errors
///
/// - [`DecodeError::InvalidLength`] if the string is not exactly
///   [`IdFormat::hex_len`] characters
/// - [`DecodeError::InvalidCharacter`] for anything but `0-9`, `a-f`, `A-F`
/// - [`DecodeError::Overflow`] if a reserved bit is set
pub fn decode_hex(format: &IdFormat, encoded: &str) -> Result<u128, DecodeError> {
    let expected = format.hex_len();
    if encoded.len() != expected {
        return Err(DecodeError::InvalidLength {
            expected,
            actual: encoded.len(),
        });
    }

    let mut acc = 0_u128;
    for (index, byte) in encoded.bytes().enumerate() {
        let digit = char::from(byte)
            .to_digit(16)
            .ok_or(DecodeError::InvalidCharacter { byte, index })?;
        acc = (acc << 4) | u128::from(digit);
    }

    if !format.fits(acc) {
        return Err(DecodeError::Overflow {
            format: format.name(),
        });
    }
    Ok(acc)
}
