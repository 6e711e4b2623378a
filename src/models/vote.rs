use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Vote {
    pub delegate_public_key: String,
    pub delegate_name: String,
    pub date: i64,
    pub is_down_vote: bool,
}
