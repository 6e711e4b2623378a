use crate::models::Transaction;
use serde::{Deserialize, Serialize};

/// A transaction matched to the voting interval of the delegate that sent it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AttributedReward {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub delegate_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricedReward {
    #[serde(flatten)]
    pub reward: AttributedReward,
    pub close_price: f64,
}

impl PricedReward {
    pub fn date(&self) -> i64 {
        self.reward.transaction.date
    }
}
