//! Transaction flag bits
//!
//! Each transaction type that takes flags gets an enum of its options.
//! [`flags_from`] folds a set of options into the `Flags` integer.

/// Global flag: require a fully canonical signature
pub const TF_FULLY_CANONICAL_SIG: u32 = 0x8000_0000;

pub trait TransactionFlag: Copy {
    fn bits(self) -> u32;
}

macro_rules! transaction_flags {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $($variant = $value),+
        }

        impl TransactionFlag for $name {
            fn bits(self) -> u32 {
                self as u32
            }
        }
    };
}

transaction_flags!(
    /// `Payment` options
    PaymentFlag {
        NoDirectRipple = 0x0001_0000,
        PartialPayment = 0x0002_0000,
        LimitQuality = 0x0004_0000,
    }
);

transaction_flags!(
    /// `OfferCreate` options
    OfferCreateFlag {
        Passive = 0x0001_0000,
        ImmediateOrCancel = 0x0002_0000,
        FillOrKill = 0x0004_0000,
        Sell = 0x0008_0000,
    }
);

transaction_flags!(
    /// `TrustSet` options
    TrustSetFlag {
        SetfAuth = 0x0001_0000,
        SetNoRipple = 0x0002_0000,
        ClearNoRipple = 0x0004_0000,
        SetFreeze = 0x0010_0000,
        ClearFreeze = 0x0020_0000,
    }
);

transaction_flags!(
    /// `PaymentChannelClaim` options
    PaymentChannelClaimFlag {
        Renew = 0x0001_0000,
        Close = 0x0002_0000,
    }
);

transaction_flags!(
    /// Values for `AccountSet`'s `SetFlag` and `ClearFlag` fields. These are
    /// account setting numbers, not bits, and are never OR-ed together.
    AccountSetFlag {
        RequireDest = 1,
        RequireAuth = 2,
        DisallowXrp = 3,
        DisableMaster = 4,
        AccountTxnId = 5,
        NoFreeze = 6,
        GlobalFreeze = 7,
        DefaultRipple = 8,
        DepositAuth = 9,
    }
);

pub fn flags_from<F: TransactionFlag>(flags: &[F]) -> u32 {
    flags.iter().fold(0, |acc, flag| acc | flag.bits())
}

pub fn has_flag<F: TransactionFlag>(flags: u32, flag: F) -> bool {
    flags & flag.bits() == flag.bits()
}
