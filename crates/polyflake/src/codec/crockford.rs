use crate::{IdFormat, codec::DecodeError};

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 5;
const CHAR_MASK: u128 = 0x1F;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes `raw` as fixed-width Crockford base32 ([`IdFormat::ascii_len`]
/// characters).
///
/// Radix 32 packs five bits per character against hex's four, so a 64-bit id
/// takes 13 characters instead of 16. The width is fixed and the alphabet is
/// in ascending ASCII order, so encoded ids of one format still sort like the
/// raw ids.
pub fn encode_ascii(format: &IdFormat, raw: u128) -> String {
    debug_assert!(format.fits(raw), "raw id wider than {format}");
    let len = format.ascii_len();
    let mut out = String::with_capacity(len);
    for i in (0..len as u32).rev() {
        let index = (raw >> (i * BITS_PER_CHAR)) & CHAR_MASK;
        out.push(char::from(ALPHABET[index as usize]));
    }
    out
}

/// Decodes a fixed-width Crockford base32 string produced by
/// [`encode_ascii`].
///
/// Lowercase letters and the Crockford aliases (`O` for `0`, `I`/`L` for `1`)
/// are accepted.
///
/// # Errors
///
/// - [`DecodeError::InvalidLength`] if the string is not exactly
///   [`IdFormat::ascii_len`] characters
/// - [`DecodeError::InvalidCharacter`] for bytes outside the alphabet
/// - [`DecodeError::Overflow`] if the value sets bits outside the layout
pub fn decode_ascii(format: &IdFormat, encoded: &str) -> Result<u128, DecodeError> {
    let expected = format.ascii_len();
    if encoded.len() != expected {
        return Err(DecodeError::InvalidLength {
            expected,
            actual: encoded.len(),
        });
    }

    let overflow = DecodeError::Overflow {
        format: format.name(),
    };
    let mut acc = 0_u128;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(DecodeError::InvalidCharacter { byte, index });
        }
        // The leading character of a 128-bit id only has room for 3 bits.
        if acc >> (u128::BITS - BITS_PER_CHAR) != 0 {
            return Err(overflow);
        }
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }

    if !format.fits(acc) {
        return Err(overflow);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(format: &IdFormat, raw: u128) {
        let encoded = encode_ascii(format, raw);
        assert_eq!(encoded.len(), format.ascii_len());
        let decoded = decode_ascii(format, &encoded).unwrap();
        assert_eq!(raw, decoded, "roundtrip for {format}: input={raw}, b32={encoded}");
    }

    #[test]
    fn encode_decode_preserves_extreme_values() {
        for format in IdFormat::ALL {
            let max = format.pack(
                format.max_timestamp(),
                format.max_node_id(),
                format.max_sequence(),
            );
            roundtrip(&format, 0);
            roundtrip(&format, 1);
            roundtrip(&format, max);
        }
    }

    #[test]
    fn encodes_known_values() {
        assert_eq!(encode_ascii(&IdFormat::TINY, 0), "0000000");
        assert_eq!(encode_ascii(&IdFormat::TINY, 31), "000000Z");
        assert_eq!(encode_ascii(&IdFormat::TINY, 32), "0000010");
        assert_eq!(encode_ascii(&IdFormat::ID128, u128::MAX), format!("7{}", "Z".repeat(25)));
    }

    #[test]
    fn encoded_order_matches_numeric_order() {
        let f = IdFormat::ID64;
        let values = [0_u128, 1, 31, 32, 1 << 40, (1 << 62) + 5, (1 << 63) - 1];
        for pair in values.windows(2) {
            assert!(encode_ascii(&f, pair[0]) < encode_ascii(&f, pair[1]));
        }
    }

    #[test]
    fn decode_accepts_lowercase_characters() {
        let upper = decode_ascii(&IdFormat::TINY, "0ABCD12").unwrap();
        let lower = decode_ascii(&IdFormat::TINY, "0abcd12").unwrap();
        let mixed = decode_ascii(&IdFormat::TINY, "0aBcD12").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
    }

    #[test]
    fn decode_treats_crockford_aliases_as_canonical_values() {
        let canonical = decode_ascii(&IdFormat::TINY, "0000101").unwrap();
        for alias in ["OOOO1O1", "oooo1o1", "0000I0L", "0000i0l"] {
            assert_eq!(decode_ascii(&IdFormat::TINY, alias).unwrap(), canonical, "{alias}");
        }
    }

    #[test]
    fn decode_rejects_invalid_characters() {
        assert_eq!(
            decode_ascii(&IdFormat::TINY, "000U000"),
            Err(DecodeError::InvalidCharacter {
                byte: b'U',
                index: 3
            })
        );
        assert!(matches!(
            decode_ascii(&IdFormat::TINY, "00000-0"),
            Err(DecodeError::InvalidCharacter { index: 5, .. })
        ));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            decode_ascii(&IdFormat::ID64, "0"),
            Err(DecodeError::InvalidLength {
                expected: 13,
                actual: 1
            })
        );
    }

    #[test]
    fn decode_rejects_values_wider_than_the_layout() {
        // 7 characters carry 35 bits; a tiny id only has 32.
        assert_eq!(
            decode_ascii(&IdFormat::TINY, "ZZZZZZZ"),
            Err(DecodeError::Overflow { format: "tiny" })
        );
        // 26 characters carry 130 bits; the first may only use 3.
        assert_eq!(
            decode_ascii(&IdFormat::ID128, &"Z".repeat(26)),
            Err(DecodeError::Overflow { format: "id128" })
        );
        // The reserved sign bit of a 64-bit id.
        assert_eq!(
            decode_ascii(&IdFormat::ID64, "8000000000000"),
            Err(DecodeError::Overflow { format: "id64" })
        );
    }
}
