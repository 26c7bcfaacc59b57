//! Calendar event types.
//!
//! A `CalendarEvent` is what one game becomes inside a published calendar.
//! Events are regenerated from game records on every sync, never patched.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event derived from a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Stable identifier; a pure function of the game id.
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub reminder: Option<Reminder>,
    pub categories: Vec<String>,
}

/// A reminder/alarm for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Minutes before the event to trigger
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    /// All-day; used when the kickoff time has not been announced.
    Date(NaiveDate),
}

impl EventTime {
    /// Instant used for ordering. All-day values sort at midnight UTC.
    pub fn sort_key(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            EventTime::Date(d) => write!(f, "{} (time TBD)", d.format("%Y-%m-%d")),
        }
    }
}

impl CalendarEvent {
    /// Document order: start ascending, ties broken by UID.
    pub fn document_order(&self, other: &Self) -> Ordering {
        self.start
            .sort_key()
            .cmp(&other.start.sort_key())
            .then_with(|| self.uid.cmp(&other.uid))
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}
