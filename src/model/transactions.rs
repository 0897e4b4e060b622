use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amount::{CurrencyAmount, XrpAmount};
use crate::codec::FieldMap;
use crate::definitions::definitions;
use crate::error::{CodecError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Memo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

/// `Memos` array entry, `{"Memo": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoWrapper {
    #[serde(rename = "Memo")]
    pub memo: Memo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Signer {
    pub account: String,
    pub txn_signature: String,
    pub signing_pub_key: String,
}

/// `Signers` array entry, `{"Signer": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerWrapper {
    #[serde(rename = "Signer")]
    pub signer: Signer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// Fields every transaction type shares
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseTx {
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(rename = "AccountTxnID", skip_serializing_if = "Option::is_none")]
    pub account_txn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<u32>,
    #[serde(rename = "NetworkID", skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoWrapper>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signers: Option<Vec<SignerWrapper>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_pub_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_signature: Option<String>,
}

impl BaseTx {
    pub fn new(account: &str) -> BaseTx {
        BaseTx {
            account: account.to_string(),
            ..BaseTx::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(flatten)]
    pub common: BaseTx,
    pub amount: CurrencyAmount,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "InvoiceID", skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<PathStep>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_max: Option<CurrencyAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_min: Option<CurrencyAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCreate {
    #[serde(flatten)]
    pub common: BaseTx,
    pub taker_gets: CurrencyAmount,
    pub taker_pays: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_sequence: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCancel {
    #[serde(flatten)]
    pub common: BaseTx,
    pub offer_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowCreate {
    #[serde(flatten)]
    pub common: BaseTx,
    pub amount: XrpAmount,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_after: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowFinish {
    #[serde(flatten)]
    pub common: BaseTx,
    pub owner: String,
    pub offer_sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowCancel {
    #[serde(flatten)]
    pub common: BaseTx,
    pub owner: String,
    pub offer_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentChannelClaim {
    #[serde(flatten)]
    pub common: BaseTx,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<XrpAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NFTokenCancelOffer {
    #[serde(flatten)]
    pub common: BaseTx,
    #[serde(rename = "NFTokenOffers")]
    pub nftoken_offers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustSet {
    #[serde(flatten)]
    pub common: BaseTx,
    pub limit_amount: CurrencyAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_out: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSet {
    #[serde(flatten)]
    pub common: BaseTx,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetRegularKey {
    #[serde(flatten)]
    pub common: BaseTx,
    /// Absent to remove the current regular key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_key: Option<String>,
}

/// A typed transaction, tagged by its `TransactionType` name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum Transaction {
    Payment(Payment),
    OfferCreate(OfferCreate),
    OfferCancel(OfferCancel),
    EscrowCreate(EscrowCreate),
    EscrowFinish(EscrowFinish),
    EscrowCancel(EscrowCancel),
    PaymentChannelClaim(PaymentChannelClaim),
    NFTokenCancelOffer(NFTokenCancelOffer),
    TrustSet(TrustSet),
    AccountSet(AccountSet),
    SetRegularKey(SetRegularKey),
}

impl Transaction {
    pub fn transaction_type(&self) -> &'static str {
        match self {
            Transaction::Payment(_) => "Payment",
            Transaction::OfferCreate(_) => "OfferCreate",
            Transaction::OfferCancel(_) => "OfferCancel",
            Transaction::EscrowCreate(_) => "EscrowCreate",
            Transaction::EscrowFinish(_) => "EscrowFinish",
            Transaction::EscrowCancel(_) => "EscrowCancel",
            Transaction::PaymentChannelClaim(_) => "PaymentChannelClaim",
            Transaction::NFTokenCancelOffer(_) => "NFTokenCancelOffer",
            Transaction::TrustSet(_) => "TrustSet",
            Transaction::AccountSet(_) => "AccountSet",
            Transaction::SetRegularKey(_) => "SetRegularKey",
        }
    }

    pub fn common(&self) -> &BaseTx {
        match self {
            Transaction::Payment(tx) => &tx.common,
            Transaction::OfferCreate(tx) => &tx.common,
            Transaction::OfferCancel(tx) => &tx.common,
            Transaction::EscrowCreate(tx) => &tx.common,
            Transaction::EscrowFinish(tx) => &tx.common,
            Transaction::EscrowCancel(tx) => &tx.common,
            Transaction::PaymentChannelClaim(tx) => &tx.common,
            Transaction::NFTokenCancelOffer(tx) => &tx.common,
            Transaction::TrustSet(tx) => &tx.common,
            Transaction::AccountSet(tx) => &tx.common,
            Transaction::SetRegularKey(tx) => &tx.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut BaseTx {
        match self {
            Transaction::Payment(tx) => &mut tx.common,
            Transaction::OfferCreate(tx) => &mut tx.common,
            Transaction::OfferCancel(tx) => &mut tx.common,
            Transaction::EscrowCreate(tx) => &mut tx.common,
            Transaction::EscrowFinish(tx) => &mut tx.common,
            Transaction::EscrowCancel(tx) => &mut tx.common,
            Transaction::PaymentChannelClaim(tx) => &mut tx.common,
            Transaction::NFTokenCancelOffer(tx) => &mut tx.common,
            Transaction::TrustSet(tx) => &mut tx.common,
            Transaction::AccountSet(tx) => &mut tx.common,
            Transaction::SetRegularKey(tx) => &mut tx.common,
        }
    }

    pub fn to_field_map(&self) -> Result<FieldMap> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(CodecError::Serialization(
                "transaction did not serialize to an object".to_string(),
            )),
        }
    }

    /// Typed view of a field map. A numeric `TransactionType`, as
    /// [`crate::codec::decode`] returns it, is resolved to its name first.
    /// Fields the typed struct does not model are dropped.
    pub fn from_field_map(tx: &FieldMap) -> Result<Transaction> {
        let mut tx = tx.clone();
        if let Some(code) = tx.get("TransactionType").and_then(Value::as_i64) {
            let code = i32::try_from(code).map_err(|_| CodecError::NotFound {
                kind: "TransactionType",
                key: code.to_string(),
            })?;
            let name = definitions()?.get_transaction_type_name_by_code(code)?;
            tx.insert(
                "TransactionType".to_string(),
                Value::String(name.to_string()),
            );
        }
        Ok(serde_json::from_value(Value::Object(tx))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode, encode_for_signing, signing_data};
    use crate::keypairs::sign;
    use crate::model::flags::{flags_from, OfferCreateFlag, TrustSetFlag};
    use serde_json::json;

    fn payment() -> Transaction {
        Transaction::Payment(Payment {
            common: BaseTx {
                fee: Some(XrpAmount(10)),
                sequence: Some(45537829),
                flags: Some(0),
                signing_pub_key: Some(
                    "ED17F53B9BBBA35BCC8E2ED0DA078B5391E191A1193CA272727D035DA3FC60A39B"
                        .to_string(),
                ),
                ..BaseTx::new("rNJWfdMZ4KM7sZAwY5MLfFfY3tDf77a7S5")
            },
            amount: CurrencyAmount::xrp(100),
            destination: "rMSNLbqJK1BuUsSbqUbq6KVr665vZMAiVo".to_string(),
            destination_tag: None,
            invoice_id: None,
            paths: None,
            send_max: None,
            deliver_min: None,
        })
    }

    #[test]
    fn test_payment_field_map() {
        let map = payment().to_field_map().unwrap();
        assert_eq!(map["TransactionType"], json!("Payment"));
        assert_eq!(map["Amount"], json!("100"));
        assert_eq!(map["Fee"], json!("10"));
        assert!(!map.contains_key("DestinationTag"));
        assert!(!map.contains_key("TxnSignature"));
    }

    #[test]
    fn test_payment_signing_vector() {
        let map = payment().to_field_map().unwrap();
        assert_eq!(
            encode_for_signing(&map).unwrap(),
            [
                "53545800",
                "12000022000000002402B6DA25",
                "614000000000000064",
                "68400000000000000A",
                "7321ED17F53B9BBBA35BCC8E2ED0DA078B5391E191A1193CA272727D035DA3FC60A39B",
                "811491E9028888C90F420E665AF6274041F1B7771B5F",
                "8314E0280C75CD9BDCB2B5A55BB8DF1C8B88006D886F",
            ]
            .concat()
        );
        let signature = sign(
            &signing_data(&map).unwrap(),
            "ED98EDA9342E29FDC0F8141E42E0B9470631A65B16BAC07FC7535B3E450E29C548",
        )
        .unwrap();
        assert_eq!(
            signature,
            "2F35CEE92BDE5126FFEC7B210491709CE1D1E348F34DBC974A225FB956507150887717FAFA71589D4893E5048B85C153FD05ED192320F9C705B5D1274FCF7302"
        );
    }

    #[test]
    fn test_from_decoded_field_map() {
        let blob = encode(&payment().to_field_map().unwrap()).unwrap();
        let decoded = decode(&blob).unwrap();
        assert_eq!(decoded["TransactionType"], json!(0));

        let tx = Transaction::from_field_map(&decoded).unwrap();
        assert_eq!(tx, payment());
        assert_eq!(tx.transaction_type(), "Payment");
    }

    #[test]
    fn test_offer_create_flags() {
        let tx = Transaction::OfferCreate(OfferCreate {
            common: BaseTx {
                flags: Some(flags_from(&[OfferCreateFlag::Sell])),
                ..BaseTx::new("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys")
            },
            taker_gets: CurrencyAmount::xrp(15_000_000_000),
            taker_pays: CurrencyAmount::issued(
                "USD",
                "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
                "7072.8",
            ),
            expiration: Some(595640108),
            offer_sequence: Some(1752791),
        });
        let map = tx.to_field_map().unwrap();
        assert_eq!(map["Flags"], json!(524288));
        assert_eq!(map["TakerPays"]["value"], json!("7072.8"));
        assert!(encode(&map).unwrap().starts_with("12000722000800002A2380BF2C2019001ABED7"));
    }

    #[test]
    fn test_trust_set_and_memos() {
        let mut tx = Transaction::TrustSet(TrustSet {
            common: BaseTx::new("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"),
            limit_amount: CurrencyAmount::issued("USD", "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B", "100"),
            quality_in: None,
            quality_out: None,
        });
        tx.common_mut().flags = Some(flags_from(&[TrustSetFlag::SetNoRipple]));
        tx.common_mut().memos = Some(vec![MemoWrapper {
            memo: Memo {
                memo_data: Some("72656E74".to_string()),
                ..Memo::default()
            },
        }]);

        let map = tx.to_field_map().unwrap();
        assert_eq!(map["Memos"], json!([{"Memo": {"MemoData": "72656E74"}}]));
        let decoded = decode(&encode(&map).unwrap()).unwrap();
        assert_eq!(Transaction::from_field_map(&decoded).unwrap(), tx);
    }

    #[test]
    fn test_unknown_transaction_type() {
        let map = json!({"TransactionType": "Teleport", "Account": "r"})
            .as_object()
            .cloned()
            .unwrap();
        assert!(matches!(
            Transaction::from_field_map(&map),
            Err(CodecError::Serialization(_))
        ));
    }
}
