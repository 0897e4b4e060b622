use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::address_codec::CryptoAlgorithm;
use crate::codec::FieldMap;
use crate::error::{CodecError, Result};

#[derive(Debug, Parser)]
#[command(name = "xrpl-codec", about = "XRP Ledger binary codec and key tool")]
pub struct Opt {
    #[arg(long = "config", global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "encode", about = "Encode a JSON transaction as canonical hex")]
    Encode {
        #[arg(help = "Transaction JSON")]
        json: String,
    },
    #[command(
        name = "encode-for-signing",
        about = "Encode the single-signing payload of a JSON transaction"
    )]
    EncodeForSigning {
        #[arg(help = "Transaction JSON")]
        json: String,
    },
    #[command(name = "decode", about = "Decode canonical hex into JSON")]
    Decode {
        #[arg(help = "Hex-encoded transaction or ledger object")]
        hex: String,
        #[arg(long = "symbolic", help = "Show transaction and ledger entry types by name")]
        symbolic: bool,
    },
    #[command(name = "hash", about = "Compute the transaction id of a signed blob")]
    Hash {
        #[arg(help = "Hex-encoded signed transaction")]
        tx_blob: String,
    },
    #[command(name = "wallet-propose", about = "Generate a new seed and its account")]
    WalletPropose {
        #[arg(long = "algorithm", help = "Key algorithm (ed25519, secp256k1)")]
        algorithm: Option<CryptoAlgorithm>,
        #[arg(long = "entropy", help = "Deterministic entropy string instead of randomness")]
        entropy: Option<String>,
    },
    #[command(name = "derive", about = "Derive the key pair and address of a seed")]
    Derive {
        #[arg(help = "Family seed")]
        seed: String,
        #[arg(long = "validator", help = "Derive validator keys instead of account keys")]
        validator: bool,
    },
    #[command(name = "sign", about = "Sign a JSON transaction")]
    Sign {
        #[arg(long = "seed", help = "Family seed of the signing account")]
        seed: String,
        #[arg(help = "Transaction JSON")]
        json: String,
    },
    #[command(name = "verify", about = "Check a signature over a hex message")]
    Verify {
        #[arg(help = "Hex-encoded message")]
        message: String,
        #[arg(help = "Hex-encoded signature")]
        signature: String,
        #[arg(help = "Hex-encoded public key")]
        public_key: String,
    },
    #[command(name = "address", about = "Derive the classic address of a public key")]
    Address {
        #[arg(help = "Hex-encoded public key")]
        public_key: String,
    },
}

/// Parse a command-line JSON argument into a field map
pub fn parse_field_map(json: &str) -> Result<FieldMap> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        _ => Err(CodecError::Serialization(
            "transaction JSON must be an object".to_string(),
        )),
    }
}
