//! Transaction encoder and decoder
//!
//! Converts between a [`FieldMap`] (the JSON form of a transaction or ledger
//! object) and its canonical binary form, and builds the prefixed payloads
//! that single signatures, multisignatures and payment channel claims are
//! computed over.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode, decode_bytes, decode_with, DecodeOptions};
pub use encoder::{
    add_signers, encode, encode_for_multisigning, encode_for_signing,
    encode_for_signing_claim, encode_to_bytes, multisigning_data, signing_data,
    transaction_hash,
};

use serde_json::{Map, Value};

/// JSON object keyed by field name
pub type FieldMap = Map<String, Value>;

/// Four-byte prefixes that domain-separate hashed and signed payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashPrefix {
    /// `STX\0`, single-signed transaction
    TransactionSign,
    /// `SMT\0`, one signer's part of a multisigned transaction
    TransactionMultiSign,
    /// `CLM\0`, off-ledger payment channel claim
    PaymentChannelClaim,
    /// `TXN\0`, transaction id
    TransactionId,
}

impl HashPrefix {
    pub fn bytes(self) -> [u8; 4] {
        match self {
            HashPrefix::TransactionSign => *b"STX\0",
            HashPrefix::TransactionMultiSign => *b"SMT\0",
            HashPrefix::PaymentChannelClaim => *b"CLM\0",
            HashPrefix::TransactionId => *b"TXN\0",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prefix_bytes() {
        assert_eq!(HashPrefix::TransactionSign.bytes(), [0x53, 0x54, 0x58, 0x00]);
        assert_eq!(HashPrefix::TransactionMultiSign.bytes(), [0x53, 0x4D, 0x54, 0x00]);
        assert_eq!(HashPrefix::PaymentChannelClaim.bytes(), [0x43, 0x4C, 0x4D, 0x00]);
        assert_eq!(HashPrefix::TransactionId.bytes(), [0x54, 0x58, 0x4E, 0x00]);
    }
}
