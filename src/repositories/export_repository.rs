use crate::error::Result;
use crate::services::host::ExportSink;
use log::info;
use std::fs;
use std::path::PathBuf;

/// Writes exports into a fixed directory instead of asking the user.
pub struct ExportRepository {
    dir: PathBuf,
}

impl ExportRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for ExportRepository {
    fn save_text(&self, content: &str, file_name: &str, extension: &str) -> Result<Option<PathBuf>> {
        let mut path = self.dir.join(file_name);
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            path.set_extension(extension);
        }

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, content)?;
        info!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(Some(path))
    }
}
