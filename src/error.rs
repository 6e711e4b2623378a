use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Delegate not found for public key {0}")]
    DelegateNotFound(String),

    #[error("Malformed vote history: {0}")]
    MalformedVoteHistory(String),

    #[error("No close price available for {0}")]
    MissingPrice(String),

    #[error("Didn't find any wallet")]
    NoWalletFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Load superseded by a newer request")]
    Canceled,
}

impl ReportError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::Network(format!("Reqwest error: {}", err))
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err.to_string())
    }
}
