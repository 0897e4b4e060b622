//! # xrpl-codec - My XRP Ledger Transaction Codec
//!
//! This crate turns XRP Ledger transactions into the exact bytes the network
//! signs and hashes, and back again. It also holds the keys that sign them.
//! When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Binary Codec**: canonical field ordering and one codec per wire type
//! - **Address Codec**: Base58Check with the ledger alphabet for addresses, seeds and public keys
//! - **Keypairs**: ED25519 and SECP256K1 derivation, signing and verification
//! - **Wallet**: a seed with its keys and address that signs and multisigns field maps
//! - **Typed Model**: serde structs for common transactions that feed the same encoder
//! - **CLI**: `xrpl-codec` for encoding, decoding, hashing and signing from a shell
//!
//! ## How I Organized My Code
//! - `definitions/`: the field registry, loaded once from the embedded table
//! - `address_codec/`: Base58Check classic addresses, seeds and public keys
//! - `binary/`: byte-level parser and serializer
//! - `types/`: one codec per wire type (integers, hashes, amounts, paths, objects)
//! - `codec/`: whole-transaction encode/decode, signing payloads and hashes
//! - `keypairs/`: seed generation, ED25519 and SECP256K1 key derivation and signing
//! - `wallet/`: a seed with its keys and address, signing field maps
//! - `model/`: typed transactions that convert to and from field maps
//! - `config/`: settings for the command-line tool
//! - `cli/`: command definitions for the `xrpl-codec` binary
//!
//! ## Key Design Decisions I Made
//! - A transaction is a JSON object keyed by field name ([`FieldMap`]), so
//!   any field in the registry can be encoded without a dedicated struct
//! - Signing payloads carry the ledger's 4-byte hash prefixes (`STX\0`, `SMT\0`)
//! - Hex output is always uppercase; hex input may be either case
//! - Decoding bounds nesting depth so a missing end marker is an error
//! - Private keys and seeds are zeroized when their owner is dropped
//!
//! ## When I Need to Understand Something
//! 1. Start with `main.rs` to see the CLI commands
//! 2. Look at `codec/encoder.rs` for canonical ordering and the signing payloads
//! 3. Check `types/amount.rs` for how native and issued amounts are packed
//! 4. Review `keypairs/secp256k1.rs` for the root and account key derivation
//! 5. Examine `wallet/wallet.rs` for the full sign flow
//!
//! ## Quick tour
//! [`codec::encode`] sorts the fields into canonical order and writes them;
//! [`codec::decode`] reads them back. [`Wallet::sign`] fills in
//! `SigningPubKey`, signs the `STX\0`-prefixed signing payload and returns
//! the blob with its hash.

pub mod address_codec;
pub mod binary;
pub mod cli;
pub mod codec;
pub mod config;
pub mod definitions;
pub mod error;
pub mod keypairs;
pub mod model;
pub mod types;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use address_codec::{
    decode_classic_address_to_account_id, decode_seed, encode_classic_address_from_public_key_hex,
    encode_seed, is_valid_classic_address, CryptoAlgorithm,
};
pub use cli::{parse_field_map, Command, Opt};
pub use codec::{
    decode, decode_with, encode, encode_for_multisigning, encode_for_signing, transaction_hash,
    DecodeOptions, FieldMap,
};
pub use config::{Config, GLOBAL_CONFIG};
pub use definitions::{definitions, Definitions, FieldHeader, FieldInstance};
pub use error::{CodecError, Result};
pub use keypairs::{
    derive_classic_address, derive_keypair, derive_node_public_key, generate_seed, sign, validate,
    Keypair,
};
pub use model::{CurrencyAmount, Transaction};
pub use wallet::{SignedTransaction, Wallet};
