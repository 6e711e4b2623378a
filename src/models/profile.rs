use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Network {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Wallet {
    pub address: String,
    #[serde(default)]
    pub balance: Option<String>,
}

/// Read-only view of the host wallet's active profile.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    #[serde(default = "default_language")]
    pub language: String,
    pub currency: String,
    pub network: Network,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Profile {
    pub fn wallet(&self, address: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.address == address)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    pub selected_address: Option<String>,
    #[serde(default)]
    pub has_accepted_disclaimer: bool,
}
