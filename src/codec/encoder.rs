use log::debug;
use serde_json::Value;

use super::{FieldMap, HashPrefix};
use crate::binary::BinarySerializer;
use crate::definitions::definitions;
use crate::error::{CodecError, Result};
use crate::types::account_id::account_id_bytes;
use crate::types::st_object::write_fields;
use crate::utils::{decode_hex, decode_hex_exact, encode_hex, sha512_half};

fn serialize(prefix: Option<HashPrefix>, tx: &FieldMap, signing_only: bool) -> Result<Vec<u8>> {
    let defs = definitions()?;
    let mut serializer = BinarySerializer::new();
    if let Some(prefix) = prefix {
        serializer.put(&prefix.bytes());
    }
    write_fields(defs, tx, &mut serializer, signing_only)?;
    Ok(serializer.into_bytes())
}

/// Canonical binary form of every serialized field
pub fn encode_to_bytes(tx: &FieldMap) -> Result<Vec<u8>> {
    serialize(None, tx, false)
}

/// Canonical binary form as uppercase hex
pub fn encode(tx: &FieldMap) -> Result<String> {
    Ok(encode_hex(&encode_to_bytes(tx)?))
}

/// Bytes a single signature is computed over: `STX\0` followed by the
/// signing fields only
pub fn signing_data(tx: &FieldMap) -> Result<Vec<u8>> {
    serialize(Some(HashPrefix::TransactionSign), tx, true)
}

pub fn encode_for_signing(tx: &FieldMap) -> Result<String> {
    Ok(encode_hex(&signing_data(tx)?))
}

/// Bytes one signer of a multisigned transaction signs: `SMT\0`, the
/// signing fields, then the signer's account id
pub fn multisigning_data(tx: &FieldMap, signer_address: &str) -> Result<Vec<u8>> {
    let account_id = account_id_bytes(signer_address)?;
    let mut data = serialize(Some(HashPrefix::TransactionMultiSign), tx, true)?;
    data.extend_from_slice(&account_id);
    Ok(data)
}

pub fn encode_for_multisigning(tx: &FieldMap, signer_address: &str) -> Result<String> {
    Ok(encode_hex(&multisigning_data(tx, signer_address)?))
}

/// Payment channel claim payload: `CLM\0`, the 32-byte channel id and the
/// claimed drops as a big-endian 64-bit integer
pub fn encode_for_signing_claim(channel: &str, amount_drops: u64) -> Result<String> {
    let channel = decode_hex_exact("Channel", channel, 32)?;
    let mut serializer = BinarySerializer::new();
    serializer.put(&HashPrefix::PaymentChannelClaim.bytes());
    serializer.put(&channel);
    serializer.put(&amount_drops.to_be_bytes());
    Ok(encode_hex(serializer.as_bytes()))
}

/// Transaction id of a signed blob: SHA-512-half of `TXN\0` + blob
pub fn transaction_hash(tx_blob: &str) -> Result<String> {
    let blob = decode_hex("TxBlob", tx_blob)?;
    let mut data = Vec::with_capacity(4 + blob.len());
    data.extend_from_slice(&HashPrefix::TransactionId.bytes());
    data.extend_from_slice(&blob);
    Ok(encode_hex(&sha512_half(&data)))
}

fn signer_account_id(entry: &Value) -> Result<[u8; 20]> {
    let account = entry
        .get("Signer")
        .and_then(|signer| signer.get("Account"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CodecError::Malformed("signer entries must be {\"Signer\": {\"Account\": ...}}".to_string())
        })?;
    account_id_bytes(account)
}

/// Merge `signers` into the transaction's `Signers` array, ordered by the
/// numeric value of each signer's account id
pub fn add_signers(tx: &mut FieldMap, signers: Vec<Value>) -> Result<()> {
    let mut entries = match tx.get("Signers") {
        Some(Value::Array(existing)) => existing.clone(),
        Some(other) => {
            return Err(CodecError::UnsupportedValue {
                wire_type: "STArray".to_string(),
                found: crate::types::json_kind(other),
            })
        }
        None => Vec::new(),
    };
    entries.extend(signers);

    let mut keyed = entries
        .into_iter()
        .map(|entry| Ok((signer_account_id(&entry)?, entry)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    if let Some(pair) = keyed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(CodecError::Malformed(format!(
            "account {} signed twice",
            encode_hex(&pair[0].0)
        )));
    }

    debug!("Transaction carries {} signers", keyed.len());
    tx.insert(
        "Signers".to_string(),
        Value::Array(keyed.into_iter().map(|(_, entry)| entry).collect()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_map(value: Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_encode_single_fields() {
        assert_eq!(encode(&field_map(json!({"Flags": 524288}))).unwrap(), "2200080000");
        assert!(encode(&field_map(json!({"Sequence": 1752792})))
            .unwrap()
            .eq_ignore_ascii_case("24001abed8"));
        assert_eq!(
            encode(&field_map(json!({"Expiration": 595640108}))).unwrap(),
            "2A2380BF2C"
        );
        assert_eq!(
            encode(&field_map(json!({"OfferSequence": 1752791}))).unwrap(),
            "2019001ABED7"
        );
        assert_eq!(
            encode(&field_map(json!({"Flags": 2147483648u64}))).unwrap(),
            "2280000000"
        );
        assert_eq!(
            encode(&field_map(json!({"TransactionType": "OfferCreate"}))).unwrap(),
            "120007"
        );
    }

    #[test]
    fn test_encode_unknown_field() {
        let err = encode(&field_map(json!({"NotAField": 1}))).unwrap_err();
        assert_eq!(err.to_string(), "FieldName NotAField not found");
    }

    #[test]
    fn test_encode_ignores_insertion_order() {
        let mut forward = FieldMap::new();
        forward.insert("Account".into(), json!("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"));
        forward.insert("TransferRate".into(), json!(4234));
        forward.insert("Expiration".into(), json!(23));

        let mut backward = FieldMap::new();
        backward.insert("Expiration".into(), json!(23));
        backward.insert("TransferRate".into(), json!(4234));
        backward.insert("Account".into(), json!("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"));

        let hex = encode(&forward).unwrap();
        assert_eq!(hex, encode(&backward).unwrap());
        // Expiration (2,10) < TransferRate (2,11) < Account (8,1)
        assert!(hex.starts_with("2A000000172B0000108A8114"));
    }

    #[test]
    fn test_signing_data_prefix_and_filter() {
        let tx = field_map(json!({
            "Sequence": 1,
            "SigningPubKey": "ED",
            "TxnSignature": "0102"
        }));
        assert_eq!(encode_for_signing(&tx).unwrap(), "5354580024000000017301ED");
        assert_eq!(encode(&tx).unwrap(), "24000000017301ED74020102");
    }

    #[test]
    fn test_multisigning_data_suffix() {
        let tx = field_map(json!({"Sequence": 1, "SigningPubKey": ""}));
        let hex = encode_for_multisigning(&tx, "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys").unwrap();
        assert_eq!(
            hex,
            "534D540024000000017300DD76483FACDEE26E60D8A586BB58D09F27045C46"
        );
    }

    #[test]
    fn test_encode_for_signing_claim() {
        let hex = encode_for_signing_claim(
            "43904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB1",
            1000,
        )
        .unwrap();
        assert_eq!(
            hex,
            "434C4D0043904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB100000000000003E8"
        );
        assert!(encode_for_signing_claim("ABCD", 1).is_err());
    }

    #[test]
    fn test_add_signers_sorts_by_account_id() {
        let mut tx = field_map(json!({"Sequence": 1}));
        let signer = |account: &str| json!({"Signer": {"Account": account, "SigningPubKey": "", "TxnSignature": ""}});
        // DD76... sorts after 0A20...
        add_signers(
            &mut tx,
            vec![
                signer("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"),
                signer("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B"),
            ],
        )
        .unwrap();
        let accounts: Vec<&str> = tx["Signers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["Signer"]["Account"].as_str().unwrap())
            .collect();
        assert_eq!(
            accounts,
            vec![
                "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
                "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"
            ]
        );

        let duplicate = add_signers(&mut tx, vec![signer("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B")]);
        assert!(matches!(duplicate, Err(CodecError::Malformed(_))));
    }

    #[test]
    fn test_transaction_hash_rejects_bad_hex() {
        assert!(matches!(
            transaction_hash("XYZ"),
            Err(CodecError::InvalidHex(_))
        ));
    }
}
