use crate::error::Result;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Smallest units per whole token.
pub const TOKEN_VALUE_FACTOR: f64 = 100_000_000.0;

const CRYPTO_CURRENCIES: [&str; 4] = ["ARK", "BTC", "ETH", "LTC"];

pub fn is_crypto(currency: &str) -> bool {
    CRYPTO_CURRENCIES.contains(&currency)
}

pub fn token_amount(amount: &BigInt) -> f64 {
    amount.to_f64().unwrap_or(0.0) / TOKEN_VALUE_FACTOR
}

pub fn load_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let raw_data = fs::read_to_string(file_path)?;
    let value: T = serde_json::from_str(&raw_data)?;
    Ok(value)
}
