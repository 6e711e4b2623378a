use crate::error::Result;
use crate::models::Profile;
use crate::services::host::ProfileProvider;
use crate::utils::helpers::load_json;
use std::path::PathBuf;

/// Reads the active profile from a JSON file on every request, so edits made
/// by the host are picked up on the next reload.
pub struct ProfileRepository {
    path: PathBuf,
}

impl ProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProfileProvider for ProfileRepository {
    fn current_profile(&self) -> Result<Profile> {
        load_json(&self.path)
    }
}
