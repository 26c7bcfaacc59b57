//! Preferences: what to track and how calendars are published.

mod preferences;
mod store;

pub use preferences::{
    ApiKeySource, CalendarOptions, Preferences, TrackingSelection, current_season,
};
pub use store::PreferenceStore;
