use crate::models::amount;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// An incoming transfer to the reported wallet, reduced to what reward
/// attribution needs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Transaction {
    #[serde(
        serialize_with = "amount::serialize_amount",
        deserialize_with = "amount::deserialize_amount"
    )]
    pub amount: BigInt,
    pub date: i64,
    pub transaction_id: String,
    pub sender_public_key: String,
}
