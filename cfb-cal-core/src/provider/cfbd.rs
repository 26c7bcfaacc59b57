//! College Football Data API client.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::wire::{ApiGame, ApiMedia, ApiTeam};
use super::{GameFilter, GameProvider, Team, sort_games};
use crate::constants::CFBD_BASE_URL;
use crate::error::{CfbError, CfbResult};
use crate::game::{GameRecord, SeasonType};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for `api.collegefootballdata.com`. One attempt per request.
pub struct CfbdClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    teams_cache: Mutex<HashMap<i32, Vec<Team>>>,
    media_cache: Mutex<HashMap<i32, HashMap<u64, String>>>,
}

impl CfbdClient {
    pub fn new(api_key: impl Into<String>) -> CfbResult<Self> {
        Self::with_base_url(api_key, CFBD_BASE_URL)
    }

    /// Point the client at another host (a mirror, or a mock server in tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> CfbResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("cfb-cal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CfbError::Provider(format!("Failed to create HTTP client: {e}")))?;

        Ok(CfbdClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            teams_cache: Mutex::new(HashMap::new()),
            media_cache: Mutex::new(HashMap::new()),
        })
    }

    /// Check the key with a cheap authenticated call.
    pub async fn verify(&self) -> CfbResult<()> {
        let _: Vec<serde_json::Value> = self.get("/conferences", &[]).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> CfbResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status, resp.text().await.unwrap_or_default()));
        }

        Ok(resp.json().await?)
    }

    async fn fetch_season_type(
        &self,
        season: i32,
        season_type: SeasonType,
        filter: &GameFilter,
    ) -> CfbResult<Vec<GameRecord>> {
        let mut query = vec![
            ("year", season.to_string()),
            ("seasonType", season_type.as_query().to_string()),
            ("classification", "fbs".to_string()),
        ];
        match filter {
            GameFilter::Team(team) => query.push(("team", team.clone())),
            GameFilter::Conference(abbr) => query.push(("conference", abbr.clone())),
            GameFilter::AllFbs => {}
        }

        let raw: Vec<ApiGame> = self.get("/games", &query).await?;
        raw.into_iter().map(GameRecord::try_from).collect()
    }

    /// Broadcast outlet per game id, TV preferred over streaming.
    async fn media(&self, season: i32) -> CfbResult<HashMap<u64, String>> {
        if let Some(cached) = self.cache_get(&self.media_cache, season) {
            return Ok(cached);
        }

        let raw: Vec<ApiMedia> = self.get("/games/media", &[("year", season.to_string())]).await?;

        let mut networks: HashMap<u64, String> = HashMap::new();
        for entry in raw {
            let Some(outlet) = entry.outlet.as_deref().map(str::trim).filter(|o| !o.is_empty())
            else {
                continue;
            };
            if entry.is_tv() || !networks.contains_key(&entry.id) {
                networks.insert(entry.id, outlet.to_string());
            }
        }

        debug!(season, games = networks.len(), "fetched broadcast info");
        self.cache_put(&self.media_cache, season, networks.clone());
        Ok(networks)
    }

    fn cache_get<V: Clone>(&self, cache: &Mutex<HashMap<i32, V>>, season: i32) -> Option<V> {
        cache.lock().ok().and_then(|c| c.get(&season).cloned())
    }

    fn cache_put<V>(&self, cache: &Mutex<HashMap<i32, V>>, season: i32, value: V) {
        if let Ok(mut c) = cache.lock() {
            c.insert(season, value);
        }
    }
}

fn status_error(status: StatusCode, body: String) -> CfbError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CfbError::Provider(format!(
            "authentication rejected ({status}); check your API key"
        )),
        StatusCode::TOO_MANY_REQUESTS => {
            CfbError::Provider("rate limit exceeded; try again later".into())
        }
        _ => {
            let body = body.trim();
            if body.is_empty() {
                CfbError::Provider(format!("request failed with status {status}"))
            } else {
                CfbError::Provider(format!("request failed with status {status}: {body}"))
            }
        }
    }
}

impl GameProvider for CfbdClient {
    async fn fetch_games(&self, season: i32, filter: &GameFilter) -> CfbResult<Vec<GameRecord>> {
        // The API answers an unknown name with an empty list.
        let filter = &self.resolve_filter(season, filter).await?;

        let mut games = self
            .fetch_season_type(season, SeasonType::Regular, filter)
            .await?;
        games.extend(
            self.fetch_season_type(season, SeasonType::Postseason, filter)
                .await?,
        );

        match self.media(season).await {
            Ok(networks) => {
                for game in &mut games {
                    game.network = networks.get(&game.id).cloned();
                }
            }
            Err(e) => warn!("Could not fetch broadcast info, continuing without it: {e}"),
        }

        sort_games(&mut games);
        info!(season, %filter, games = games.len(), "fetched games");
        Ok(games)
    }

    async fn teams(&self, season: i32) -> CfbResult<Vec<Team>> {
        if let Some(cached) = self.cache_get(&self.teams_cache, season) {
            return Ok(cached);
        }

        let raw: Vec<ApiTeam> = self.get("/teams/fbs", &[("year", season.to_string())]).await?;
        let mut teams: Vec<Team> = raw.into_iter().map(Team::from).collect();
        teams.sort_by(|a, b| a.school.cmp(&b.school));

        info!(season, teams = teams.len(), "fetched FBS teams");
        self.cache_put(&self.teams_cache, season, teams.clone());
        Ok(teams)
    }
}
