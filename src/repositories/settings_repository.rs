use crate::error::Result;
use crate::models::Settings;
use crate::services::host::SettingsStore;
use crate::utils::helpers::load_json;
use log::info;
use std::fs;
use std::path::PathBuf;

pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        load_json(&self.path)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}

impl SettingsStore for SettingsRepository {
    fn selected_address(&self) -> Result<Option<String>> {
        Ok(self.load()?.selected_address)
    }

    fn persist_selected_address(&self, address: &str) -> Result<()> {
        let mut settings = self.load()?;
        settings.selected_address = Some(address.to_string());
        self.save(&settings)?;
        info!("Saved selected address {}", address);
        Ok(())
    }

    fn has_accepted_disclaimer(&self) -> Result<bool> {
        Ok(self.load()?.has_accepted_disclaimer)
    }

    fn accept_disclaimer(&self) -> Result<()> {
        let mut settings = self.load()?;
        settings.has_accepted_disclaimer = true;
        self.save(&settings)
    }
}
