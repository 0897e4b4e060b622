//! Typed transaction model
//!
//! Structs for the common transaction types, serialized with serde into the
//! same field maps the binary codec consumes. A field map decoded from a
//! blob converts back into a [`Transaction`] as long as its type is modelled
//! here.

pub mod amount;
pub mod flags;
pub mod transactions;

pub use amount::{CurrencyAmount, IssuedCurrencyAmount, XrpAmount};
pub use flags::{
    flags_from, has_flag, AccountSetFlag, OfferCreateFlag, PaymentChannelClaimFlag, PaymentFlag,
    TransactionFlag, TrustSetFlag, TF_FULLY_CANONICAL_SIG,
};
pub use transactions::{
    AccountSet, BaseTx, EscrowCancel, EscrowCreate, EscrowFinish, Memo, MemoWrapper,
    NFTokenCancelOffer, OfferCancel, OfferCreate, PathStep, Payment, PaymentChannelClaim,
    SetRegularKey, Signer, SignerWrapper, Transaction, TrustSet,
};
