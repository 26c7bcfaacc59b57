//! The sports-data provider seam.
//!
//! Everything that needs games or teams goes through [`GameProvider`], so
//! sync and schedule logic can run against an in-memory fake in tests.

mod cfbd;
mod wire;

pub use cfbd::CfbdClient;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conferences;
use crate::error::{CfbError, CfbResult};
use crate::game::GameRecord;

/// Which games to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameFilter {
    /// Canonical school name, as the provider spells it.
    Team(String),
    /// Conference abbreviation.
    Conference(String),
    AllFbs,
}

impl fmt::Display for GameFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameFilter::Team(name) => write!(f, "team={name}"),
            GameFilter::Conference(abbr) => write!(f, "conference={abbr}"),
            GameFilter::AllFbs => write!(f, "all FBS"),
        }
    }
}

/// An FBS program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub school: String,
    pub mascot: Option<String>,
    pub abbreviation: Option<String>,
    pub conference: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait GameProvider {
    /// Regular-season and postseason games for `season`, sorted by kickoff.
    ///
    /// Fails with `NotFound` when the filter names an unknown team or conference.
    async fn fetch_games(&self, season: i32, filter: &GameFilter) -> CfbResult<Vec<GameRecord>>;

    /// All FBS teams for `season`.
    async fn teams(&self, season: i32) -> CfbResult<Vec<Team>>;

    /// Resolve a user-typed team name against the season's FBS teams.
    async fn resolve_team(&self, season: i32, name: &str) -> CfbResult<Team> {
        let teams = self.teams(season).await?;
        resolve_team_name(&teams, name).cloned()
    }

    /// Rewrite a user-supplied filter into the names the provider queries by.
    async fn resolve_filter(&self, season: i32, filter: &GameFilter) -> CfbResult<GameFilter> {
        Ok(match filter {
            GameFilter::Team(name) => GameFilter::Team(self.resolve_team(season, name).await?.school),
            GameFilter::Conference(name) => {
                GameFilter::Conference(conferences::resolve(name)?.abbreviation.to_string())
            }
            GameFilter::AllFbs => GameFilter::AllFbs,
        })
    }
}

/// Match `name` against `teams`.
///
/// Exact school name first (any case), then exact mascot or abbreviation,
/// then a substring of exactly one school name.
pub fn resolve_team_name<'a>(teams: &'a [Team], name: &str) -> CfbResult<&'a Team> {
    let needle = name.trim();
    if needle.is_empty() {
        return Err(CfbError::team_not_found(name));
    }

    if let Some(team) = teams.iter().find(|t| t.school.eq_ignore_ascii_case(needle)) {
        return Ok(team);
    }

    let alias_matches = |alias: &Option<String>| {
        alias
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case(needle))
    };
    let mut by_alias = teams
        .iter()
        .filter(|t| alias_matches(&t.mascot) || alias_matches(&t.abbreviation));
    if let (Some(team), None) = (by_alias.next(), by_alias.next()) {
        return Ok(team);
    }

    let lowered = needle.to_lowercase();
    let mut by_substring = teams
        .iter()
        .filter(|t| t.school.to_lowercase().contains(&lowered));
    match (by_substring.next(), by_substring.next()) {
        (Some(team), None) => Ok(team),
        _ => Err(CfbError::team_not_found(name)),
    }
}

/// Keep the games in `games` that `filter` selects. Providers that cannot
/// filter server-side (and the test fake) use this.
pub fn filter_games(games: Vec<GameRecord>, filter: &GameFilter) -> Vec<GameRecord> {
    match filter {
        GameFilter::Team(team) => games.into_iter().filter(|g| g.involves_team(team)).collect(),
        GameFilter::Conference(conf) => games
            .into_iter()
            .filter(|g| g.involves_conference(conf))
            .collect(),
        GameFilter::AllFbs => games,
    }
}

/// Kickoff order, then week.
pub(crate) fn sort_games(games: &mut [GameRecord]) {
    games.sort_by(|a, b| {
        a.kickoff
            .cmp(&b.kickoff)
            .then_with(|| a.week.cmp(&b.week))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use super::*;

    /// In-memory provider. Records every filter it was asked for.
    #[derive(Default)]
    pub struct FakeProvider {
        pub games: Vec<GameRecord>,
        pub teams: Vec<Team>,
        pub requests: RefCell<Vec<GameFilter>>,
        pub fail_with: Option<String>,
    }

    impl GameProvider for FakeProvider {
        async fn fetch_games(&self, season: i32, filter: &GameFilter) -> CfbResult<Vec<GameRecord>> {
            self.requests.borrow_mut().push(filter.clone());
            if let Some(reason) = &self.fail_with {
                return Err(CfbError::Provider(reason.clone()));
            }
            let filter = self.resolve_filter(season, filter).await?;
            let mut games = filter_games(self.games.clone(), &filter);
            sort_games(&mut games);
            Ok(games)
        }

        async fn teams(&self, _season: i32) -> CfbResult<Vec<Team>> {
            Ok(self.teams.clone())
        }
    }

    pub fn team(school: &str, mascot: &str, abbreviation: &str, conference: &str) -> Team {
        Team {
            school: school.to_string(),
            mascot: Some(mascot.to_string()),
            abbreviation: Some(abbreviation.to_string()),
            conference: Some(conference.to_string()),
        }
    }

    pub fn big_ten_teams() -> Vec<Team> {
        vec![
            team("Michigan", "Wolverines", "MICH", "Big Ten"),
            team("Michigan State", "Spartans", "MSU", "Big Ten"),
            team("Ohio State", "Buckeyes", "OSU", "Big Ten"),
            team("Penn State", "Nittany Lions", "PSU", "Big Ten"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeProvider, big_ten_teams};
    use super::*;
    use crate::error::EntityKind;
    use crate::game::fixtures::the_game;

    #[test]
    fn test_resolve_exact_school_beats_substring() {
        let teams = big_ten_teams();
        assert_eq!(resolve_team_name(&teams, "michigan").unwrap().school, "Michigan");
    }

    #[test]
    fn test_resolve_by_mascot_or_abbreviation() {
        let teams = big_ten_teams();
        assert_eq!(resolve_team_name(&teams, "Buckeyes").unwrap().school, "Ohio State");
        assert_eq!(resolve_team_name(&teams, "psu").unwrap().school, "Penn State");
    }

    #[test]
    fn test_resolve_unique_substring() {
        let teams = big_ten_teams();
        assert_eq!(resolve_team_name(&teams, "Ohio").unwrap().school, "Ohio State");
    }

    #[test]
    fn test_ambiguous_or_unknown_is_not_found() {
        let teams = big_ten_teams();
        for name in ["State", "Alabama", "  "] {
            let err = resolve_team_name(&teams, name).unwrap_err();
            assert!(
                matches!(err, CfbError::NotFound { kind: EntityKind::Team, .. }),
                "{name}: got {err:?}"
            );
        }
    }

    #[test]
    fn test_filter_games_by_team_and_conference() {
        let games = vec![the_game()];
        assert_eq!(filter_games(games.clone(), &GameFilter::Team("Michigan".into())).len(), 1);
        assert_eq!(filter_games(games.clone(), &GameFilter::Team("Alabama".into())).len(), 0);
        assert_eq!(filter_games(games.clone(), &GameFilter::Conference("B1G".into())).len(), 1);
        assert_eq!(filter_games(games, &GameFilter::Conference("SEC".into())).len(), 0);
    }

    #[tokio::test]
    async fn test_default_resolve_team_uses_teams() {
        let provider = FakeProvider {
            teams: big_ten_teams(),
            ..FakeProvider::default()
        };
        let team = provider.resolve_team(2025, "Spartans").await.unwrap();
        assert_eq!(team.school, "Michigan State");
        assert!(provider.resolve_team(2025, "Alabama").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_games_resolves_names() {
        let provider = FakeProvider {
            games: vec![the_game()],
            teams: big_ten_teams(),
            ..FakeProvider::default()
        };

        let by_mascot = provider
            .fetch_games(2025, &GameFilter::Team("Wolverines".into()))
            .await
            .unwrap();
        assert_eq!(by_mascot.len(), 1);

        let by_full_name = provider
            .fetch_games(2025, &GameFilter::Conference("Big Ten Conference".into()))
            .await
            .unwrap();
        assert_eq!(by_full_name.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_games_unknown_name_is_not_found() {
        let provider = FakeProvider {
            games: vec![the_game()],
            teams: big_ten_teams(),
            ..FakeProvider::default()
        };

        let err = provider
            .fetch_games(2025, &GameFilter::Team("Atlantis Tech".into()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, CfbError::NotFound { kind: EntityKind::Team, .. }),
            "got {err:?}"
        );

        let err = provider
            .fetch_games(2025, &GameFilter::Conference("XYZ".into()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, CfbError::NotFound { kind: EntityKind::Conference, .. }),
            "got {err:?}"
        );
    }
}
