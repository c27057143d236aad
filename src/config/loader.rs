use super::types::{Overrides, Settings, SettingsFile};
use crate::{LibraryError, Result};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "libris.yaml";
pub const ENV_DATA_FILE: &str = "LIBRIS_DATA_FILE";
pub const ENV_SEED_DEMO: &str = "LIBRIS_SEED_DEMO";

/// Resolves [`Settings`] from flags, environment, config file and defaults
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    working_dir: PathBuf,
    user_config: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl ConfigLoader {
    /// Loader reading the process environment and the platform config dir
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let user_config = ProjectDirs::from("", "", "libris")
            .map(|dirs| dirs.config_dir().join("config.yaml"));
        let env = [ENV_DATA_FILE, ENV_SEED_DEMO]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();

        Self {
            working_dir: working_dir.into(),
            user_config,
            env,
        }
    }

    /// Replace the user-level config file location
    pub fn with_user_config(mut self, path: Option<PathBuf>) -> Self {
        self.user_config = path;
        self
    }

    /// Replace the environment snapshot
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn load(&self, overrides: &Overrides) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(file) = self.read_config_file(overrides.config.as_deref())? {
            if let Some(data_file) = file.data_file {
                settings.data_file = data_file;
            }
            if let Some(seed_demo) = file.seed_demo {
                settings.seed_demo = seed_demo;
            }
        }

        if let Some(data_file) = self.env.get(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
            settings.data_file = PathBuf::from(data_file);
        }
        if let Some(raw) = self.env.get(ENV_SEED_DEMO) {
            settings.seed_demo = parse_flag(ENV_SEED_DEMO, raw)?;
        }

        if let Some(data_file) = &overrides.data_file {
            settings.data_file = data_file.clone();
        }
        if overrides.no_seed {
            settings.seed_demo = false;
        }

        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    fn read_config_file(&self, explicit: Option<&Path>) -> Result<Option<SettingsFile>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(LibraryError::Config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            return parse_config_file(path).map(Some);
        }

        let local = self.working_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return parse_config_file(&local).map(Some);
        }

        match &self.user_config {
            Some(path) if path.is_file() => parse_config_file(path).map(Some),
            _ => Ok(None),
        }
    }
}

fn parse_config_file(path: &Path) -> Result<SettingsFile> {
    debug!(path = %path.display(), "Reading config file");
    let contents = std::fs::read_to_string(path).map_err(|e| {
        LibraryError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    // An empty file deserializes to unit rather than a mapping.
    if contents.trim().is_empty() {
        return Ok(SettingsFile::default());
    }

    Ok(serde_yaml_ng::from_str(&contents)?)
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LibraryError::Config(format!(
            "{} must be true or false, got '{}'",
            name, other
        ))),
    }
}
