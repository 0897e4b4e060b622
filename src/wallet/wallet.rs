use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use zeroize::ZeroizeOnDrop;

use crate::address_codec::CryptoAlgorithm;
use crate::codec::{encode, multisigning_data, signing_data, transaction_hash, FieldMap};
use crate::error::Result;
use crate::keypairs::{derive_classic_address, derive_keypair, generate_seed, sign, Keypair};

/// Hex blob ready for submission and the transaction id it will have
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx_blob: String,
    pub hash: String,
}

#[derive(Clone, ZeroizeOnDrop)]
pub struct Wallet {
    seed: String,
    #[zeroize(skip)]
    keypair: Keypair,
    #[zeroize(skip)]
    classic_address: String,
}

impl Wallet {
    pub fn from_seed(seed: &str) -> Result<Wallet> {
        let keypair = derive_keypair(seed, false)?;
        let classic_address = derive_classic_address(keypair.public_key())?;
        Ok(Wallet {
            seed: seed.to_string(),
            keypair,
            classic_address,
        })
    }

    /// New wallet from operating system randomness
    pub fn generate(algorithm: CryptoAlgorithm) -> Result<Wallet> {
        Wallet::from_seed(&generate_seed("", algorithm)?)
    }

    /// Deterministic wallet for a fixed entropy string
    pub fn from_entropy(entropy: &str, algorithm: CryptoAlgorithm) -> Result<Wallet> {
        Wallet::from_seed(&generate_seed(entropy, algorithm)?)
    }

    pub fn get_seed(&self) -> &str {
        &self.seed
    }

    pub fn get_public_key(&self) -> &str {
        self.keypair.public_key()
    }

    pub fn get_private_key(&self) -> &str {
        self.keypair.private_key()
    }

    pub fn get_address(&self) -> &str {
        &self.classic_address
    }

    pub fn get_algorithm(&self) -> CryptoAlgorithm {
        self.keypair.algorithm()
    }

    /// Sign `tx` as its only signer. `SigningPubKey` is overwritten with this
    /// wallet's key and any existing `TxnSignature` is replaced.
    pub fn sign(&self, tx: &FieldMap) -> Result<SignedTransaction> {
        let mut tx = tx.clone();
        tx.insert(
            "SigningPubKey".to_string(),
            Value::String(self.get_public_key().to_string()),
        );
        let signature = sign(&signing_data(&tx)?, self.get_private_key())?;
        tx.insert("TxnSignature".to_string(), Value::String(signature));

        let tx_blob = encode(&tx)?;
        let hash = transaction_hash(&tx_blob)?;
        debug!("Signed transaction {hash} for {}", self.classic_address);
        Ok(SignedTransaction { tx_blob, hash })
    }

    /// Produce this wallet's `Signer` entry for a multisigned `tx`. Merge the
    /// entries with [`crate::codec::add_signers`].
    pub fn multisign(&self, tx: &FieldMap) -> Result<Value> {
        let mut tx = tx.clone();
        tx.insert("SigningPubKey".to_string(), Value::String(String::new()));
        let data = multisigning_data(&tx, &self.classic_address)?;
        let signature = sign(&data, self.get_private_key())?;
        Ok(json!({
            "Signer": {
                "Account": self.classic_address,
                "SigningPubKey": self.get_public_key(),
                "TxnSignature": signature,
            }
        }))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("seed", &"<redacted>")
            .field("public_key", &self.get_public_key())
            .field("classic_address", &self.classic_address)
            .finish()
    }
}
