use crate::persistence::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Effective settings after all layers are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Catalogue data file
    pub data_file: PathBuf,
    /// Insert the demo books when the catalogue starts empty
    pub seed_demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            seed_demo: true,
        }
    }
}

/// Contents of a `libris.yaml` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub seed_demo: Option<bool>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit config file; must exist when given
    pub config: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub no_seed: bool,
}
