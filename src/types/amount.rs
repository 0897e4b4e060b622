use serde_json::{Map, Value};

use super::account_id::{account_id_bytes, read_address};
use super::currency::{currency_from_bytes, currency_to_bytes, CURRENCY_LENGTH};
use super::{unsupported, WireType};
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};

/// Set for issued-currency amounts, clear for native drops
const NOT_NATIVE_BIT: u64 = 0x8000_0000_0000_0000;
/// Set for positive (and zero native) amounts
const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;

pub const MAX_DROPS: u64 = 100_000_000_000_000_000;

const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
const MAX_SIGNIFICANT_DIGITS: usize = 16;
const MIN_EXPONENT: i32 = -96;
const MAX_EXPONENT: i32 = 80;
const EXPONENT_BIAS: i32 = 97;
const MANTISSA_MASK: u64 = (1 << 54) - 1;

const NATIVE_AMOUNT_LENGTH: usize = 8;

/// Normalised issued value: sign, mantissa in [10^15, 10^16) and exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IssuedValue {
    negative: bool,
    mantissa: u64,
    exponent: i32,
}

/// Wire form of a native amount given as a whole number of drops
pub fn native_to_bytes(drops: &str) -> Result<[u8; NATIVE_AMOUNT_LENGTH]> {
    let invalid = || CodecError::InvalidAmount(format!("`{drops}` is not a whole number of drops"));
    let (negative, digits) = match drops.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, drops),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u64 = digits.parse().map_err(|_| invalid())?;
    native_drops_to_bytes(value, negative)
}

fn native_drops_to_bytes(drops: u64, negative: bool) -> Result<[u8; NATIVE_AMOUNT_LENGTH]> {
    if drops > MAX_DROPS {
        return Err(CodecError::InvalidAmount(format!(
            "{drops} drops exceeds the maximum of {MAX_DROPS}"
        )));
    }
    let mut bits = drops;
    if !negative || drops == 0 {
        bits |= POSITIVE_BIT;
    }
    Ok(bits.to_be_bytes())
}

fn parse_issued_value(value: &str) -> Result<Option<IssuedValue>> {
    let invalid = || CodecError::InvalidAmount(format!("`{value}` is not a valid issued value"));

    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let (coefficient, mut exponent) = match rest.find(|c| c == 'e' || c == 'E') {
        Some(i) => (
            &rest[..i],
            rest[i + 1..].parse::<i32>().map_err(|_| invalid())?,
        ),
        None => (rest, 0),
    };
    let (int_part, frac_part) = coefficient.split_once('.').unwrap_or((coefficient, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{int_part}{frac_part}");
    exponent = i32::try_from(frac_part.len())
        .ok()
        .and_then(|len| exponent.checked_sub(len))
        .ok_or_else(invalid)?;

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(None);
    }
    let trimmed = significant.trim_end_matches('0');
    exponent = exponent
        .checked_add((significant.len() - trimmed.len()) as i32)
        .ok_or_else(invalid)?;
    if trimmed.len() > MAX_SIGNIFICANT_DIGITS {
        return Err(CodecError::InvalidAmount(format!(
            "`{value}` has more than {MAX_SIGNIFICANT_DIGITS} significant digits"
        )));
    }

    let mut mantissa: u64 = trimmed.parse().map_err(|_| invalid())?;
    while mantissa < MIN_MANTISSA {
        mantissa *= 10;
        exponent = exponent.checked_sub(1).ok_or_else(invalid)?;
    }
    if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
        return Err(CodecError::InvalidAmount(format!(
            "`{value}` is outside the representable exponent range"
        )));
    }
    Ok(Some(IssuedValue {
        negative,
        mantissa,
        exponent,
    }))
}

/// 64-bit value field of an issued amount
pub fn issued_value_to_bits(value: &str) -> Result<u64> {
    let mut bits = NOT_NATIVE_BIT;
    if let Some(parsed) = parse_issued_value(value)? {
        if !parsed.negative {
            bits |= POSITIVE_BIT;
        }
        bits |= ((parsed.exponent + EXPONENT_BIAS) as u64) << 54;
        bits |= parsed.mantissa;
    }
    Ok(bits)
}

/// Shortest decimal rendering of an issued value, exponential outside
/// 1e-7 .. 1e21
pub fn issued_bits_to_value(bits: u64) -> String {
    let mantissa = bits & MANTISSA_MASK;
    if mantissa == 0 {
        return "0".to_string();
    }
    let negative = bits & POSITIVE_BIT == 0;
    let mut exponent = ((bits >> 54) & 0xFF) as i32 - EXPONENT_BIAS;

    let mut digits = mantissa.to_string();
    while digits.ends_with('0') {
        digits.pop();
        exponent += 1;
    }
    let scientific = exponent + digits.len() as i32 - 1;

    let body = if scientific <= -7 || scientific >= 21 {
        let (lead, rest) = digits.split_at(1);
        let coefficient = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{lead}.{rest}")
        };
        if scientific < 0 {
            format!("{coefficient}e{scientific}")
        } else {
            format!("{coefficient}e+{scientific}")
        }
    } else if exponent >= 0 {
        format!("{digits}{}", "0".repeat(exponent as usize))
    } else {
        let point = digits.len() as i32 + exponent;
        if point > 0 {
            let (whole, fraction) = digits.split_at(point as usize);
            format!("{whole}.{fraction}")
        } else {
            format!("0.{}{digits}", "0".repeat((-point) as usize))
        }
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(unsupported(WireType::Amount, other)),
        None => Err(CodecError::InvalidAmount(format!(
            "issued amount is missing `{key}`"
        ))),
    }
}

pub fn from_json(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::String(drops) => Ok(native_to_bytes(drops)?.to_vec()),
        Value::Number(n) => {
            let drops = n
                .as_u64()
                .ok_or_else(|| unsupported(WireType::Amount, value))?;
            Ok(native_drops_to_bytes(drops, false)?.to_vec())
        }
        Value::Object(object) => {
            let bits = issued_value_to_bits(required_str(object, "value")?)?;
            let currency = currency_to_bytes(required_str(object, "currency")?)?;
            let issuer = account_id_bytes(required_str(object, "issuer")?)?;

            let mut bytes = Vec::with_capacity(8 + CURRENCY_LENGTH * 2);
            bytes.extend_from_slice(&bits.to_be_bytes());
            bytes.extend_from_slice(&currency);
            bytes.extend_from_slice(&issuer);
            Ok(bytes)
        }
        other => Err(unsupported(WireType::Amount, other)),
    }
}

pub fn to_json(parser: &mut BinaryParser<'_>) -> Result<Value> {
    let first = parser.peek().ok_or(CodecError::OutOfBounds {
        requested: NATIVE_AMOUNT_LENGTH,
        remaining: 0,
    })?;
    let bits = parser.read_u64()?;

    if first & 0x80 == 0 {
        let drops = bits & !(NOT_NATIVE_BIT | POSITIVE_BIT);
        let negative = bits & POSITIVE_BIT == 0 && drops != 0;
        let rendered = if negative {
            format!("-{drops}")
        } else {
            drops.to_string()
        };
        return Ok(Value::String(rendered));
    }

    let currency = currency_from_bytes(parser.read_bytes(CURRENCY_LENGTH)?)?;
    let issuer = read_address(parser)?;
    let mut object = Map::new();
    object.insert("currency".to_string(), Value::String(currency));
    object.insert("issuer".to_string(), Value::String(issuer));
    object.insert(
        "value".to_string(),
        Value::String(issued_bits_to_value(bits)),
    );
    Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::encode_hex;
    use serde_json::json;

    fn decode(bytes: &[u8]) -> Value {
        let mut parser = BinaryParser::new(bytes);
        let value = to_json(&mut parser).unwrap();
        assert!(parser.is_end());
        value
    }

    #[test]
    fn test_native_amounts() {
        assert_eq!(
            encode_hex(&from_json(&json!("10")).unwrap()),
            "400000000000000A"
        );
        assert_eq!(
            encode_hex(&from_json(&json!("15000000000")).unwrap()),
            "400000037E11D600"
        );
        assert_eq!(encode_hex(&from_json(&json!("0")).unwrap()), "4000000000000000");
        assert_eq!(decode(&from_json(&json!("15000000000")).unwrap()), json!("15000000000"));
    }

    #[test]
    fn test_native_limits() {
        assert!(from_json(&json!("100000000000000000")).is_ok());
        assert!(matches!(
            from_json(&json!("100000000000000001")),
            Err(CodecError::InvalidAmount(_))
        ));
        assert!(matches!(
            from_json(&json!("1.5")),
            Err(CodecError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_negative_native_amount() {
        let bytes = from_json(&json!("-25")).unwrap();
        assert_eq!(encode_hex(&bytes), "0000000000000019");
        assert_eq!(decode(&bytes), json!("-25"));
    }

    #[test]
    fn test_issued_amount_vector() {
        let amount = json!({
            "currency": "USD",
            "issuer": "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
            "value": "7072.8"
        });
        let bytes = from_json(&amount).unwrap();
        let expected = [
            "D55920AC93914000",
            "0000000000000000000000005553440000000000",
            "0A20B3C85F482532A9578DBB3950B85CA06594D1",
        ]
        .concat();
        assert_eq!(encode_hex(&bytes), expected);
        assert_eq!(decode(&bytes), amount);
    }

    #[test]
    fn test_issued_value_bits() {
        assert_eq!(issued_value_to_bits("1").unwrap(), 0xD483_8D7E_A4C6_8000);
        assert_eq!(issued_value_to_bits("0.6275558355").unwrap(), 0xD456_4B96_4A84_5AC0);
        assert_eq!(issued_value_to_bits("0").unwrap(), 0x8000_0000_0000_0000);
        assert_eq!(issued_value_to_bits("-0.0").unwrap(), 0x8000_0000_0000_0000);
    }

    #[test]
    fn test_issued_value_rendering() {
        for (input, rendered) in [
            ("7072.8", "7072.8"),
            ("0.6275558355", "0.6275558355"),
            ("-1", "-1"),
            ("1000", "1000"),
            ("1.0e3", "1000"),
            ("0.000001", "0.000001"),
            ("0.00000001", "1e-8"),
            ("1500000000000000000000", "1.5e+21"),
            ("123456789e-20", "1.23456789e-12"),
        ] {
            let bits = issued_value_to_bits(input).unwrap();
            assert_eq!(issued_bits_to_value(bits), rendered, "{input}");
        }
    }

    #[test]
    fn test_issued_value_limits() {
        assert!(matches!(
            issued_value_to_bits("12345678901234567"),
            Err(CodecError::InvalidAmount(_))
        ));
        assert!(issued_value_to_bits("1234567890123456").is_ok());
        assert!(issued_value_to_bits("1e-82").is_err());
        assert!(issued_value_to_bits("1e96").is_err());
        assert!(issued_value_to_bits("9999999999999999e80").is_ok());
        assert!(issued_value_to_bits("1.2.3").is_err());
        assert!(issued_value_to_bits("abc").is_err());
        assert!(issued_value_to_bits("").is_err());
    }

    #[test]
    fn test_issued_value_extreme_exponents() {
        assert!(matches!(
            issued_value_to_bits("1e-2147483648"),
            Err(CodecError::InvalidAmount(_))
        ));
        assert!(matches!(
            issued_value_to_bits("0.5e-2147483647"),
            Err(CodecError::InvalidAmount(_))
        ));
        assert!(matches!(
            issued_value_to_bits("1e2147483647"),
            Err(CodecError::InvalidAmount(_))
        ));
        assert!(issued_value_to_bits("1e-2147483649").is_err());
    }

    #[test]
    fn test_issued_amount_missing_key() {
        let err = from_json(&json!({"currency": "USD", "value": "1"})).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidAmount("issued amount is missing `issuer`".to_string())
        );
    }

    #[test]
    fn test_amount_rejects_other_json_types() {
        assert!(matches!(
            from_json(&json!(true)),
            Err(CodecError::UnsupportedValue { found: "boolean", .. })
        ));
        assert!(matches!(
            from_json(&json!([1])),
            Err(CodecError::UnsupportedValue { found: "array", .. })
        ));
    }

    #[test]
    fn test_truncated_issued_amount() {
        let bytes = from_json(&json!({
            "currency": "USD",
            "issuer": "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
            "value": "1"
        }))
        .unwrap();
        let mut parser = BinaryParser::new(&bytes[..30]);
        assert!(matches!(
            to_json(&mut parser),
            Err(CodecError::OutOfBounds { .. })
        ));
    }
}
