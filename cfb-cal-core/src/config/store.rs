//! Loading and saving the preference document.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use tracing::debug;

use super::preferences::Preferences;
use crate::error::{CfbError, CfbResult};
use crate::utils::write_atomic;

/// Reads and writes the JSON preference document at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PreferenceStore { path: path.into() }
    }

    /// Store at `<config dir>/cfb-cal/config.json`.
    pub fn at_default_location() -> CfbResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> CfbResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CfbError::Config("Could not determine config directory".into()))?
            .join("cfb-cal");

        Ok(config_dir.join("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load preferences; a missing document yields the defaults.
    pub fn load(&self) -> CfbResult<Preferences> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no preference document, using defaults");
            return Ok(Preferences::default());
        }

        let path = self.path.to_string_lossy();
        Config::builder()
            .add_source(File::new(&path, FileFormat::Json))
            .build()
            .and_then(|c| c.try_deserialize::<Preferences>())
            .map_err(|e| {
                CfbError::Config(format!(
                    "Could not read preferences at {}: {e}",
                    self.path.display()
                ))
            })
    }

    /// Overwrite the document with `prefs`.
    pub fn save(&self, prefs: &Preferences) -> CfbResult<()> {
        let content = serde_json::to_string_pretty(prefs)
            .map_err(|e| CfbError::Config(format!("Could not serialize preferences: {e}")))?;

        write_atomic(&self.path, content.as_bytes()).map_err(|e| {
            CfbError::Config(format!(
                "Could not write preferences to {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }

    /// Load, apply `change`, and save. Returns whatever `change` returns.
    pub fn update<T>(&self, change: impl FnOnce(&mut Preferences) -> T) -> CfbResult<T> {
        let mut prefs = self.load()?;
        let result = change(&mut prefs);
        self.save(&prefs)?;
        Ok(result)
    }
}
