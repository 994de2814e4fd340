use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Encoding was asked to compress zero bytes.
    #[error("input is empty, nothing to encode")]
    EmptyInput,

    /// A prefix code needs at least two distinct symbols.
    #[error("input has {distinct} distinct byte value(s), at least 2 are required")]
    InsufficientAlphabet { distinct: usize },

    /// The bit stream ended before a complete code was read.
    #[error("stream truncated: {0}")]
    TruncatedStream(String),

    #[error("malformed container: {0}")]
    MalformedContainer(String),

    #[error("byte {0:#04x} has no code in this table")]
    UnknownSymbol(u8),

    /// The bit count is stored as a 32-bit integer.
    #[error("encoded payload of {bits} bits does not fit a 32-bit bit count")]
    PayloadTooLarge { bits: usize },

    #[error("failed to serialize code table: {0}")]
    Serialize(#[from] rmp_serde::encode::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
