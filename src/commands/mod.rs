pub mod conferences;
pub mod export;
pub mod init;
pub mod schedule;
pub mod status;
pub mod sync;
pub mod teams;
pub mod track;
pub mod untrack;

use std::path::PathBuf;

use anyhow::Result;
use cfb_cal_core::config::{PreferenceStore, Preferences};
use cfb_cal_core::constants::API_KEY_ENV;
use cfb_cal_core::provider::CfbdClient;

pub use crate::utils::tui::create_spinner;

/// What every command needs: where preferences live.
pub struct Context {
    pub store: PreferenceStore,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let store = match config_path {
            Some(path) => PreferenceStore::new(path),
            None => PreferenceStore::at_default_location()?,
        };
        Ok(Context { store })
    }

    pub fn load(&self) -> Result<Preferences> {
        Ok(self.store.load()?)
    }

    /// Client for the provider, failing with setup instructions when no key
    /// is configured.
    pub fn client(&self, prefs: &Preferences) -> Result<CfbdClient> {
        let Some(source) = prefs.api_key() else {
            anyhow::bail!(
                "No API key configured.\n\n\
                Get a free key at https://collegefootballdata.com/key, then run:\n  \
                cfb-cal init\n\n\
                or set {API_KEY_ENV} in your environment."
            );
        };
        Ok(CfbdClient::new(source.key())?)
    }
}
