use num_bigint::BigInt;
use serde::{self, Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Amounts travel as decimal strings of the token's smallest unit.
pub fn serialize_amount<S>(amount: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_amount(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid amount {}", raw)))
}

/// Parses an integer amount of smallest units. Anything else, including a
/// fractional amount, is rejected.
pub fn parse_amount(raw: &str) -> Option<BigInt> {
    BigInt::from_str(raw.trim()).ok()
}
