//! Utility functions and helpers
//!
//! Hashing primitives, base58 in the ledger alphabet and hex helpers shared
//! by the address codec, the binary codec and the keypair subsystem.

pub mod crypto;
pub mod encoding;

pub use crypto::{
    base58_decode, base58_encode, hash160, ripemd160_digest, sha256_digest, sha512_half,
};
pub use encoding::{decode_hex, decode_hex_exact, encode_hex};
