//! Error handling for the codec
//!
//! Every encode, decode, address and key operation returns this error type.
//! The variants carry enough context (field or instance name, expected vs.
//! actual) to diagnose a failure without re-running it.

use std::fmt;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error types for codec, address and keypair operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input bytes do not have the fixed length an encoding requires
    EncodeLength {
        instance: String,
        expected: usize,
        actual: usize,
    },
    /// A field name, type name or type code has no registry entry
    NotFound { kind: &'static str, key: String },
    /// The parser was asked for more bytes than remain in the buffer
    OutOfBounds { requested: usize, remaining: usize },
    /// A field header byte sequence could not be interpreted
    MalformedHeader(String),
    /// Structurally invalid binary input (bad length prefix, missing terminator, ...)
    Malformed(String),
    /// Input is not valid base58 in the ledger alphabet
    InvalidBase58(String),
    /// Base58Check checksum did not verify
    ChecksumMismatch,
    /// Decoded payload does not start with the expected version prefix
    PrefixMismatch { expected: Vec<u8>, actual: Vec<u8> },
    /// Input is not valid hexadecimal
    InvalidHex(String),
    /// A currency amount could not be represented on the wire
    InvalidAmount(String),
    /// A dynamic value has a runtime type the wire type cannot encode
    UnsupportedValue {
        wire_type: String,
        found: &'static str,
    },
    /// An algorithm tag or key matches neither supported family
    UnsupportedAlgorithm(String),
    /// A seed's version prefix matches neither supported family
    UnknownSeedAlgorithm,
    /// A classic address failed validation
    InvalidClassicAddress(String),
    /// Cryptographic operation errors
    Crypto(String),
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors outside the binary codec
    Serialization(String),
    /// File I/O errors
    Io(String),
}

impl CodecError {
    pub fn field_not_found(name: &str) -> Self {
        CodecError::NotFound {
            kind: "FieldName",
            key: name.to_string(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EncodeLength {
                instance,
                expected,
                actual,
            } => write!(f, "`{instance}` length should be {expected} not {actual}"),
            CodecError::NotFound { kind, key } => write!(f, "{kind} {key} not found"),
            CodecError::OutOfBounds {
                requested,
                remaining,
            } => write!(
                f,
                "Parser out of bounds: requested {requested} bytes, {remaining} remaining"
            ),
            CodecError::MalformedHeader(msg) => write!(f, "Malformed field header: {msg}"),
            CodecError::Malformed(msg) => write!(f, "Malformed encoding: {msg}"),
            CodecError::InvalidBase58(msg) => write!(f, "Invalid base58 encoding: {msg}"),
            CodecError::ChecksumMismatch => write!(f, "Base58Check checksum mismatch"),
            CodecError::PrefixMismatch { expected, actual } => write!(
                f,
                "Prefix mismatch: expected {}, found {}",
                hex::encode_upper(expected),
                hex::encode_upper(actual)
            ),
            CodecError::InvalidHex(msg) => write!(f, "Invalid hex: {msg}"),
            CodecError::InvalidAmount(msg) => write!(f, "Invalid amount: {msg}"),
            CodecError::UnsupportedValue { wire_type, found } => {
                write!(f, "Unexpected {found} value for {wire_type}")
            }
            CodecError::UnsupportedAlgorithm(msg) => write!(f, "Unsupported algorithm: {msg}"),
            CodecError::UnknownSeedAlgorithm => {
                write!(f, "Invalid seed; could not determine encoding algorithm")
            }
            CodecError::InvalidClassicAddress(addr) => {
                write!(f, "`{addr}` is an invalid classic address")
            }
            CodecError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            CodecError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CodecError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            CodecError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        CodecError::InvalidHex(err.to_string())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Serialization(err.to_string())
    }
}

impl From<bs58::decode::Error> for CodecError {
    fn from(err: bs58::decode::Error) -> Self {
        CodecError::InvalidBase58(err.to_string())
    }
}

impl From<toml::de::Error> for CodecError {
    fn from(err: toml::de::Error) -> Self {
        CodecError::Config(err.to_string())
    }
}
