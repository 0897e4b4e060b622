use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Drops of XRP. Serialized as a decimal string, the way the ledger's JSON
/// carries native amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct XrpAmount(pub u64);

impl XrpAmount {
    pub fn drops(self) -> u64 {
        self.0
    }
}

impl fmt::Display for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for XrpAmount {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(XrpAmount)
            .map_err(|_| CodecError::InvalidAmount(format!("`{s}` is not a whole number of drops")))
    }
}

impl TryFrom<String> for XrpAmount {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<XrpAmount> for String {
    fn from(amount: XrpAmount) -> Self {
        amount.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCurrencyAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

/// Native drops or an issued currency amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyAmount {
    Xrp(XrpAmount),
    Issued(IssuedCurrencyAmount),
}

impl CurrencyAmount {
    pub fn xrp(drops: u64) -> CurrencyAmount {
        CurrencyAmount::Xrp(XrpAmount(drops))
    }

    pub fn issued(currency: &str, issuer: &str, value: &str) -> CurrencyAmount {
        CurrencyAmount::Issued(IssuedCurrencyAmount {
            currency: currency.to_string(),
            issuer: issuer.to_string(),
            value: value.to_string(),
        })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, CurrencyAmount::Xrp(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_xrp_amount_is_a_string() {
        assert_eq!(serde_json::to_value(XrpAmount(15)).unwrap(), json!("15"));
        let amount: XrpAmount = serde_json::from_value(json!("1000000")).unwrap();
        assert_eq!(amount.drops(), 1_000_000);
        assert!(serde_json::from_value::<XrpAmount>(json!("1.5")).is_err());
    }

    #[test]
    fn test_currency_amount_untagged() {
        let native: CurrencyAmount = serde_json::from_value(json!("100")).unwrap();
        assert_eq!(native, CurrencyAmount::xrp(100));
        assert!(native.is_native());

        let issued: CurrencyAmount = serde_json::from_value(json!({
            "currency": "USD",
            "issuer": "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
            "value": "7072.8"
        }))
        .unwrap();
        assert_eq!(
            issued,
            CurrencyAmount::issued("USD", "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B", "7072.8")
        );
        assert!(!issued.is_native());
    }
}
