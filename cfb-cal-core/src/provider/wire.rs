//! Raw College Football Data API payloads and their conversion into
//! [`GameRecord`]s. Nothing outside the provider module sees these types.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use super::Team;
use crate::error::CfbError;
use crate::game::{GameRecord, SeasonType, Side};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGame {
    pub id: Option<u64>,
    pub season: Option<i32>,
    pub week: Option<u32>,
    pub season_type: Option<SeasonType>,
    pub start_date: Option<String>,
    #[serde(default, rename = "startTimeTBD")]
    pub start_time_tbd: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub neutral_site: bool,
    #[serde(default)]
    pub conference_game: bool,
    pub venue: Option<String>,
    pub home_team: Option<String>,
    pub home_conference: Option<String>,
    pub home_points: Option<u32>,
    pub away_team: Option<String>,
    pub away_conference: Option<String>,
    pub away_points: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub school: String,
    pub mascot: Option<String>,
    pub abbreviation: Option<String>,
    pub conference: Option<String>,
}

impl From<ApiTeam> for Team {
    fn from(t: ApiTeam) -> Self {
        Team {
            school: t.school,
            mascot: t.mascot,
            abbreviation: t.abbreviation,
            conference: t.conference,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMedia {
    pub id: u64,
    pub outlet: Option<String>,
    pub media_type: Option<String>,
}

impl ApiMedia {
    pub fn is_tv(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("tv"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl TryFrom<ApiGame> for GameRecord {
    type Error = CfbError;

    fn try_from(raw: ApiGame) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .ok_or_else(|| CfbError::Provider("malformed game: missing id".into()))?;
        let malformed = |what: &str| CfbError::Provider(format!("malformed game {id}: {what}"));

        let home_team = non_empty(raw.home_team).ok_or_else(|| malformed("missing home team"))?;
        let away_team = non_empty(raw.away_team).ok_or_else(|| malformed("missing away team"))?;
        let start_date = raw.start_date.ok_or_else(|| malformed("missing startDate"))?;
        let kickoff = DateTime::parse_from_rfc3339(&start_date)
            .map_err(|e| malformed(&format!("bad startDate '{start_date}': {e}")))?
            .with_timezone(&Utc);

        Ok(GameRecord {
            id,
            season: raw.season.unwrap_or_else(|| kickoff.year()),
            week: raw.week.unwrap_or(0),
            season_type: raw.season_type.unwrap_or(SeasonType::Regular),
            kickoff,
            start_time_tbd: raw.start_time_tbd,
            neutral_site: raw.neutral_site,
            conference_game: raw.conference_game,
            home: Side {
                team: home_team,
                conference: non_empty(raw.home_conference),
                points: raw.home_points,
            },
            away: Side {
                team: away_team,
                conference: non_empty(raw.away_conference),
                points: raw.away_points,
            },
            venue: non_empty(raw.venue),
            network: None,
            completed: raw.completed,
            notes: non_empty(raw.notes),
        })
    }
}
