use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricePoint {
    pub time: i64,
    pub close: f64,
}

/// CryptoCompare `histoday` envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoDayResponse {
    pub response: Option<String>,
    pub message: Option<String>,
    pub data: Option<HistoDayData>,
}

/// `Data` is a plain array in the v1 endpoint and `{ Data: [...] }` in v2.
/// Error responses carry an empty object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoDayData {
    Points(Vec<PricePoint>),
    Nested {
        #[serde(rename = "Data")]
        data: Vec<PricePoint>,
    },
    Unrecognized(serde_json::Value),
}

impl HistoDayData {
    pub fn into_points(self) -> Option<Vec<PricePoint>> {
        match self {
            HistoDayData::Points(points) => Some(points),
            HistoDayData::Nested { data } => Some(data),
            HistoDayData::Unrecognized(_) => None,
        }
    }
}
