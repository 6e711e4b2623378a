//! Seams to the host wallet runtime. Everything the session needs from its
//! surroundings arrives through a [`HostContext`].

use crate::error::Result;
use crate::models::Profile;
use crate::services::peer_api::PeerApi;
use crate::services::price_service::PriceApi;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;

pub trait ProfileProvider: Send + Sync {
    fn current_profile(&self) -> Result<Profile>;
}

pub trait SettingsStore: Send + Sync {
    fn selected_address(&self) -> Result<Option<String>>;
    fn persist_selected_address(&self, address: &str) -> Result<()>;
    fn has_accepted_disclaimer(&self) -> Result<bool>;
    fn accept_disclaimer(&self) -> Result<()>;
}

pub trait ExportSink: Send + Sync {
    /// Returns where the text ended up, or `None` if the user declined.
    fn save_text(&self, content: &str, file_name: &str, extension: &str) -> Result<Option<PathBuf>>;
}

pub trait AlertSink: Send + Sync {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn success(&self, message: &str) {
        info!("{}", message);
    }
}

#[derive(Clone)]
pub struct HostContext {
    pub peer: Arc<dyn PeerApi>,
    pub prices: Arc<dyn PriceApi>,
    pub profiles: Arc<dyn ProfileProvider>,
    pub settings: Arc<dyn SettingsStore>,
    pub exports: Arc<dyn ExportSink>,
    pub alerts: Arc<dyn AlertSink>,
}
