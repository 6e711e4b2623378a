use crate::error::{ReportError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const PAGE_SIZE: u32 = 100;

pub struct Config {
    pub peer_api_url: String,
    pub price_api_url: String,
    pub profile_path: PathBuf,
    pub settings_path: PathBuf,
    pub export_dir: PathBuf,
    pub delegate_lookup_concurrency: usize,
    pub http_timeout_secs: u64,
    pub accept_disclaimer: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            peer_api_url: env::var("PEER_API_URL")
                .map_err(|_| ReportError::Config("PEER_API_URL must be set".to_string()))?,
            price_api_url: env::var("PRICE_API_URL")
                .unwrap_or_else(|_| "https://min-api.cryptocompare.com/data".to_string()),
            profile_path: env::var("PROFILE_PATH")
                .unwrap_or_else(|_| "profile.json".to_string())
                .into(),
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| "report_settings.json".to_string())
                .into(),
            export_dir: env::var("EXPORT_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            delegate_lookup_concurrency: parse_var("DELEGATE_LOOKUP_CONCURRENCY", "1")?,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", "30")?,
            accept_disclaimer: env_flag("REPORT_ACCEPT_DISCLAIMER"),
        })
    }
}

/// `1` or `true` (any case) switches a flag on; anything else, or unset, is off.
pub fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn parse_var<T: FromStr>(name: &str, default: &str) -> Result<T> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| ReportError::Config(format!("{} has an invalid value: {}", name, raw)))
}
