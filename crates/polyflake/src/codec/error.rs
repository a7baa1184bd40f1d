/// Failure to decode a hex or Crockford base32 id string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input does not have the fixed width of the format's encoding.
    #[error("invalid length: expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A byte outside the encoding's alphabet.
    #[error("invalid character {:?} at index {index}", char::from(*byte))]
    InvalidCharacter { byte: u8, index: usize },

    /// The decoded value sets bits outside the format's layout.
    #[error("decoded value does not fit the {format} format")]
    Overflow { format: &'static str },
}
