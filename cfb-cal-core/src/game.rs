//! Normalized game records.
//!
//! The provider adapter converts raw API responses into these types at a
//! single parsing boundary; everything downstream works with them only.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};

use crate::conferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    Regular,
    Postseason,
}

impl SeasonType {
    pub fn as_query(&self) -> &'static str {
        match self {
            SeasonType::Regular => "regular",
            SeasonType::Postseason => "postseason",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonType::Regular => write!(f, "regular season"),
            SeasonType::Postseason => write!(f, "postseason"),
        }
    }
}

/// One team's side of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub team: String,
    pub conference: Option<String>,
    pub points: Option<u32>,
}

/// A scheduled (or played) game as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub season: i32,
    pub week: u32,
    pub season_type: SeasonType,
    /// Kickoff instant. When `start_time_tbd` is set only the date is meaningful.
    pub kickoff: DateTime<Utc>,
    pub start_time_tbd: bool,
    pub neutral_site: bool,
    pub conference_game: bool,
    pub home: Side,
    pub away: Side,
    pub venue: Option<String>,
    /// Broadcast outlet (e.g. "FOX"), if known.
    pub network: Option<String>,
    pub completed: bool,
    /// Game name for bowls and other named games.
    pub notes: Option<String>,
}

impl GameRecord {
    /// "Ohio State at Michigan", or "A vs B" at a neutral site.
    pub fn matchup(&self) -> String {
        let joiner = if self.neutral_site { "vs" } else { "at" };
        format!("{} {} {}", self.away.team, joiner, self.home.team)
    }

    /// Final score, only for completed games with both scores reported.
    pub fn final_score(&self) -> Option<String> {
        if !self.completed {
            return None;
        }
        let (away, home) = (self.away.points?, self.home.points?);
        Some(format!(
            "{} {} - {} {}",
            self.away.team, away, self.home.team, home
        ))
    }

    /// Calendar date of the game as US Eastern time, which is how the
    /// provider schedules TBD kickoffs.
    pub fn local_date(&self) -> NaiveDate {
        self.kickoff.with_timezone(&New_York).date_naive()
    }

    pub fn involves_team(&self, team: &str) -> bool {
        self.home.team.eq_ignore_ascii_case(team) || self.away.team.eq_ignore_ascii_case(team)
    }

    /// True when either side plays in the conference, given by abbreviation or full name.
    pub fn involves_conference(&self, conference: &str) -> bool {
        [&self.home.conference, &self.away.conference]
            .into_iter()
            .flatten()
            .any(|c| conferences::same_conference(c, conference))
    }
}
