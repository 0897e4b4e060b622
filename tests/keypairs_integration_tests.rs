//! Keypair and address integration tests
//!
//! Seeds, key derivation, signing and classic addresses checked against
//! known vectors, plus a full sign-then-verify pass through the wallet.

use serde_json::json;
use xrpl_codec::address_codec::{
    base58check_decode, decode_account_public_key, encode_account_public_key,
};
use xrpl_codec::codec::{decode, encode_for_signing, signing_data};
use xrpl_codec::keypairs::{generate_seed_with, OsRandom};
use xrpl_codec::utils::decode_hex;
use xrpl_codec::{
    decode_classic_address_to_account_id, decode_seed, derive_classic_address, derive_keypair,
    encode_seed, generate_seed, is_valid_classic_address, sign, validate, CodecError,
    CryptoAlgorithm, Wallet,
};

#[test]
fn test_ed25519_seed_to_public_key() {
    let keypair = derive_keypair("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH", false).unwrap();
    assert_eq!(
        keypair.public_key(),
        "ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6"
    );
}

#[test]
fn test_public_key_to_classic_address() {
    assert_eq!(
        derive_classic_address(
            "ED731C39781B964904E1FEEFFC9F99442196BCB5F499105A79533E2D678CA7D3D2"
        )
        .unwrap(),
        "rhTCnDC7v1Jp7NAupzisv6ynWHD161Q9nV"
    );
}

#[test]
fn test_sign_hello_world() {
    let private_key = "EDBB3ECA8985E1484FA6A28C4B30FB0042A2CC5DF3EC8DC37B5F3D126DDFD3CA14";
    let public_key = "ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6";
    let signature = sign(b"hello world", private_key).unwrap();
    assert_eq!(
        signature,
        "E83CAFEAF100793F0C6570D60C7447FF3A87E0DC0CAE9AD90EF0102860EC3BD1D20F432494021F3E19DAFF257A420CA64A49C283AB5AD00B6B0CEA1756151C01"
    );
    assert!(validate(b"hello world", public_key, &signature).unwrap());
}

#[test]
fn test_secp256k1_seed_vector() {
    let keypair = derive_keypair("sp5fghtJtpUorTwvof1NpDXAzNwf5", false).unwrap();
    assert_eq!(
        keypair.private_key(),
        "00D78B9735C3F26501C7337B8A5727FD53A6EFDBC6AA55984F098488561F985E23"
    );
    assert_eq!(
        keypair.public_key(),
        "030D58EB48B4420B1F7B9DF55087E0E29FEF0E8468F9A6825B01CA2C361042D435"
    );
    assert_eq!(
        derive_classic_address(keypair.public_key()).unwrap(),
        "rU6K7V3Po4snVhBBaU29sesqs2qTQJWDw1"
    );
}

#[test]
fn test_seed_generation_vectors() {
    let cases = [
        ("fakeRandomString", CryptoAlgorithm::Ed25519, "sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"),
        ("fakeRandomString", CryptoAlgorithm::Secp256k1, "sh3pdwcaoo7vt5rtrEZJ7a75LnDo3"),
        ("setPasswordOverLen16", CryptoAlgorithm::Ed25519, "sEdTuXdrgQobjDidph2oMDN36jGZX2U"),
        ("setPasswordOverLen16", CryptoAlgorithm::Secp256k1, "shJYdazRN9dvWbGqCehzHcBKWBaFR"),
    ];
    for (entropy, algorithm, expected) in cases {
        let seed = generate_seed(entropy, algorithm).unwrap();
        assert_eq!(seed, expected);
        let (decoded, decoded_algorithm) = decode_seed(&seed).unwrap();
        assert_eq!(decoded, &entropy.as_bytes()[..16]);
        assert_eq!(decoded_algorithm, algorithm);
        assert_eq!(encode_seed(&decoded, algorithm).unwrap(), seed);
    }
}

#[test]
fn test_random_seeds_derive_working_keys() {
    for algorithm in [CryptoAlgorithm::Ed25519, CryptoAlgorithm::Secp256k1] {
        let seed = generate_seed_with("", algorithm, &mut OsRandom).unwrap();
        let keypair = derive_keypair(&seed, false).unwrap();
        assert_eq!(keypair.algorithm(), algorithm);
        let address = derive_classic_address(keypair.public_key()).unwrap();
        assert!(is_valid_classic_address(&address));
    }
}

#[test]
fn test_payment_signing_vector() {
    let tx = json!({
        "TransactionType": "Payment",
        "Account": "rNJWfdMZ4KM7sZAwY5MLfFfY3tDf77a7S5",
        "Destination": "rMSNLbqJK1BuUsSbqUbq6KVr665vZMAiVo",
        "Amount": "100",
        "Fee": "10",
        "Flags": 0,
        "Sequence": 45537829,
        "SigningPubKey": "ED17F53B9BBBA35BCC8E2ED0DA078B5391E191A1193CA272727D035DA3FC60A39B"
    })
    .as_object()
    .cloned()
    .unwrap();

    let signature = sign(
        &signing_data(&tx).unwrap(),
        "ED98EDA9342E29FDC0F8141E42E0B9470631A65B16BAC07FC7535B3E450E29C548",
    )
    .unwrap();
    assert_eq!(
        signature,
        "2F35CEE92BDE5126FFEC7B210491709CE1D1E348F34DBC974A225FB956507150887717FAFA71589D4893E5048B85C153FD05ED192320F9C705B5D1274FCF7302"
    );
    assert!(validate(
        &signing_data(&tx).unwrap(),
        "ED17F53B9BBBA35BCC8E2ED0DA078B5391E191A1193CA272727D035DA3FC60A39B",
        &signature
    )
    .unwrap());
}

#[test]
fn test_wallet_sign_and_verify() {
    let wallet = Wallet::from_entropy("setPasswordOverLen16", CryptoAlgorithm::Secp256k1).unwrap();
    let tx = json!({
        "TransactionType": "Payment",
        "Account": wallet.get_address(),
        "Destination": "rhTCnDC7v1Jp7NAupzisv6ynWHD161Q9nV",
        "Amount": {
            "currency": "USD",
            "issuer": "rhTCnDC7v1Jp7NAupzisv6ynWHD161Q9nV",
            "value": "12.5"
        },
        "Fee": "12",
        "Sequence": 7
    })
    .as_object()
    .cloned()
    .unwrap();

    let signed = wallet.sign(&tx).unwrap();
    assert_eq!(signed, wallet.sign(&tx).unwrap());
    assert_eq!(signed.hash.len(), 64);

    let decoded = decode(&signed.tx_blob).unwrap();
    let message = decode_hex("Message", &encode_for_signing(&decoded).unwrap()).unwrap();
    assert!(validate(
        &message,
        wallet.get_public_key(),
        decoded["TxnSignature"].as_str().unwrap()
    )
    .unwrap());
}

#[test]
fn test_classic_address_account_id() {
    let (prefix, account_id) =
        decode_classic_address_to_account_id("r3Y6vCE8XqfZmYBRngy22uFYkmz3y9eCRA").unwrap();
    assert_eq!(prefix, 0);
    assert_eq!(
        hex::encode_upper(account_id),
        "52C7F01AD13B3CA9C1D133FA8F3482D2EF08FA7D"
    );
}

#[test]
fn test_single_character_change_breaks_checksum() {
    let address = "rU6K7V3Po4snVhBBaU29sesqs2qTQJWDw1";
    assert!(base58check_decode(address).is_ok());
    for i in 1..address.len() {
        let mut chars: Vec<char> = address.chars().collect();
        chars[i] = if chars[i] == 'p' { 'r' } else { 'p' };
        let tampered: String = chars.into_iter().collect();
        assert!(base58check_decode(&tampered).is_err(), "{tampered}");
        assert!(!is_valid_classic_address(&tampered));
    }
}

#[test]
fn test_account_public_key_round_trip() {
    let public_key =
        decode_hex("PublicKey", "030D58EB48B4420B1F7B9DF55087E0E29FEF0E8468F9A6825B01CA2C361042D435")
            .unwrap();
    let encoded = encode_account_public_key(&public_key).unwrap();
    assert!(encoded.starts_with('a'));
    assert_eq!(decode_account_public_key(&encoded).unwrap(), public_key);
}

#[test]
fn test_bad_inputs() {
    assert!(matches!(
        decode_seed("sEdTjrdnJaPE2NNjmavQqXQdrf71NiX"),
        Err(CodecError::ChecksumMismatch)
    ));
    assert!(matches!(
        decode_seed("rU6K7V3Po4snVhBBaU29sesqs2qTQJWDw1"),
        Err(CodecError::UnknownSeedAlgorithm)
    ));
    assert!(matches!(
        encode_seed(b"short", CryptoAlgorithm::Ed25519),
        Err(CodecError::EncodeLength { expected: 16, actual: 5, .. })
    ));
    assert!(matches!(
        sign(b"msg", "ABCD"),
        Err(CodecError::UnsupportedAlgorithm(_))
    ));
}
