//! Whole-file JSON persistence for the catalogue

pub mod snapshot;

pub use snapshot::{BookDocument, CatalogueSnapshot};

use crate::catalogue::Catalogue;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "library_data.json";

/// Write the catalogue to `path`, replacing whatever was there
pub fn save(catalogue: &Catalogue, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let snapshot = CatalogueSnapshot::capture(catalogue);
    let content = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, content)?;

    info!(path = %path.display(), records = catalogue.len(), "Saved catalogue");
    Ok(())
}

/// Read the catalogue from `path`. A missing file is an empty catalogue.
pub fn load(path: &Path) -> Result<Catalogue> {
    if !path.exists() {
        debug!(path = %path.display(), "No data file, starting empty");
        return Ok(Catalogue::new());
    }

    let content = fs::read_to_string(path)?;
    let snapshot: CatalogueSnapshot = serde_json::from_str(&content)?;
    let catalogue = snapshot.restore()?;

    info!(path = %path.display(), records = catalogue.len(), "Loaded catalogue");
    Ok(catalogue)
}

/// A data file location bound to the load/save pair
#[derive(Debug, Clone)]
pub struct CatalogueFile {
    path: PathBuf,
}

impl CatalogueFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Catalogue> {
        load(&self.path)
    }

    pub fn save(&self, catalogue: &Catalogue) -> Result<()> {
        save(catalogue, &self.path)
    }
}

impl Default for CatalogueFile {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
