//! Wire shapes returned by the peer API.

use serde::{Deserialize, Serialize};

pub const TYPE_TRANSFER: u32 = 0;
pub const TYPE_MULTI_PAYMENT: u32 = 6;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawTimestamp {
    pub unix: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPayment {
    pub recipient_id: String,
    pub amount: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawAsset {
    #[serde(default)]
    pub payments: Vec<RawPayment>,
    #[serde(default)]
    pub votes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: Option<u32>,
    pub amount: Option<String>,
    #[serde(default)]
    pub sender_public_key: String,
    pub timestamp: Option<RawTimestamp>,
    pub asset: Option<RawAsset>,
}

impl RawTransaction {
    pub fn unix_time(&self) -> Option<i64> {
        self.timestamp.as_ref().and_then(|t| t.unix)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawDelegate {
    pub username: String,
}
