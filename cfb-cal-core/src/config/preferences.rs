//! The persisted preference document.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{API_KEY_ENV, DEFAULT_CALENDAR_NAME, DEFAULT_REMINDER_MINUTES};

/// Everything cfb-cal remembers between runs.
///
/// ```json
/// {
///   "season": 2025,
///   "tracked": { "teams": ["Michigan"], "conferences": ["SEC"], "track_all_fbs": false },
///   "calendar": { "output_dir": "~/calendars", "include_tv_info": true, ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Only set when the user chose to persist the key; the environment wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfbd_api_key: Option<String>,

    #[serde(default = "current_season")]
    pub season: i32,

    #[serde(default)]
    pub tracked: TrackingSelection,

    #[serde(default)]
    pub calendar: CalendarOptions,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            cfbd_api_key: None,
            season: current_season(),
            tracked: TrackingSelection::default(),
            calendar: CalendarOptions::default(),
        }
    }
}

/// Where the API key came from, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment(String),
    ConfigFile(String),
}

impl ApiKeySource {
    pub fn key(&self) -> &str {
        match self {
            ApiKeySource::Environment(k) | ApiKeySource::ConfigFile(k) => k,
        }
    }
}

impl Preferences {
    /// Resolve the API key, preferring the environment over the document.
    pub fn api_key(&self) -> Option<ApiKeySource> {
        let from_env = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());

        match from_env {
            Some(key) => Some(ApiKeySource::Environment(key)),
            None => self
                .cfbd_api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .map(ApiKeySource::ConfigFile),
        }
    }
}

/// The season in progress: football seasons run into January, so early-year
/// dates still belong to the previous year's season.
pub fn current_season() -> i32 {
    let today = Utc::now().date_naive();
    if today.month() < 3 {
        today.year() - 1
    } else {
        today.year()
    }
}

/// Which teams and conferences to follow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingSelection {
    #[serde(default)]
    pub teams: BTreeSet<String>,
    #[serde(default)]
    pub conferences: BTreeSet<String>,
    #[serde(default)]
    pub track_all_fbs: bool,
}

impl TrackingSelection {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.conferences.is_empty() && !self.track_all_fbs
    }

    /// Returns false if the team (in any casing) was already tracked.
    pub fn add_team(&mut self, team: &str) -> bool {
        if find_ignore_case(&self.teams, team).is_some() {
            return false;
        }
        self.teams.insert(team.to_string())
    }

    /// Removes a team by case-insensitive name, returning the stored spelling.
    pub fn remove_team(&mut self, team: &str) -> Option<String> {
        let stored = find_ignore_case(&self.teams, team)?;
        self.teams.remove(&stored);
        Some(stored)
    }

    pub fn add_conference(&mut self, conference: &str) -> bool {
        if find_ignore_case(&self.conferences, conference).is_some() {
            return false;
        }
        self.conferences.insert(conference.to_string())
    }

    pub fn remove_conference(&mut self, conference: &str) -> Option<String> {
        let stored = find_ignore_case(&self.conferences, conference)?;
        self.conferences.remove(&stored);
        Some(stored)
    }

    /// Returns true if the flag changed.
    pub fn set_track_all_fbs(&mut self, enabled: bool) -> bool {
        let changed = self.track_all_fbs != enabled;
        self.track_all_fbs = enabled;
        changed
    }
}

fn find_ignore_case(set: &BTreeSet<String>, name: &str) -> Option<String> {
    set.iter().find(|s| s.eq_ignore_ascii_case(name.trim())).cloned()
}

fn default_true() -> bool {
    true
}

fn default_reminder_minutes() -> u32 {
    DEFAULT_REMINDER_MINUTES
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("cfb-cal").join("calendars"))
        .unwrap_or_else(|| PathBuf::from("calendars"))
}

/// How published calendars look. Read-only during a sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarOptions {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub include_tv_info: bool,
    #[serde(default = "default_true")]
    pub include_venue: bool,
    /// Alarm offset before kickoff; 0 disables the alarm.
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: u32,
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            output_dir: default_output_dir(),
            include_tv_info: true,
            include_venue: true,
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
            calendar_name: default_calendar_name(),
        }
    }
}

impl CalendarOptions {
    /// Output directory with a leading `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned())
    }
}
