//! Error types for address parsing, response decoding, and ABI encoding.

/// Local decode failures for addresses and engine responses.
///
/// All variants are non-recoverable for the input that produced them and
/// are reported to the caller immediately. A response is never padded to
/// make it decodable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Address text or bytes that do not describe exactly 20 bytes.
    #[error("invalid address format: {0}")]
    InvalidAddressFormat(String),

    /// A buffer shorter than the layout it declares.
    #[error("truncated buffer: needed {needed} bytes, got {available}")]
    TruncatedBuffer { needed: usize, available: usize },

    /// A declared length field holding a negative value.
    #[error("truncated buffer: negative declared length {0}")]
    NegativeLength(i32),

    /// A result too long for the response header's `i32` length field.
    #[error("result of {0} bytes exceeds the i32 length field")]
    LengthOverflow(usize),
}

impl CodecError {
    /// Returns true for both truncation variants.
    ///
    /// A negative length can never be satisfied by any buffer, so it is
    /// reported as truncation too.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedBuffer { .. } | Self::NegativeLength(_))
    }
}

/// Failures while encoding a call against a contract interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The interface has no function with this name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments for the function.
    #[error("{function}: expected {expected} arguments, got {got}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    /// An argument does not fit the declared parameter type.
    #[error("{function}: argument {index} expected {expected}, got {got}")]
    TypeMismatch {
        function: String,
        index: usize,
        expected: String,
        got: String,
    },

    /// A parameter type outside the supported subset.
    #[error("unsupported ABI type: {0}")]
    UnsupportedType(String),

    /// The interface description itself could not be read.
    #[error("invalid interface description: {0}")]
    InvalidInterface(String),
}
