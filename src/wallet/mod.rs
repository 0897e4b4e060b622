//! Wallets
//!
//! A wallet is a seed plus the key pair and classic address it derives. It
//! signs transactions given as field maps, either alone or as one signer of
//! a multisigned transaction.

#[allow(clippy::module_inception)]
pub mod wallet;

pub use wallet::{SignedTransaction, Wallet};
