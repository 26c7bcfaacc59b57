use anyhow::Result;
use cfb_cal_core::config::TrackingSelection;
use cfb_cal_core::game::GameRecord;
use cfb_cal_core::provider::{GameFilter, GameProvider};
use chrono::Utc;
use owo_colors::OwoColorize;

use super::{Context, create_spinner};
use crate::render::{Render, schedule_header};

pub struct Query {
    pub team: Option<String>,
    pub conference: Option<String>,
    pub week: Option<u32>,
    pub upcoming: bool,
    pub limit: usize,
    pub season: Option<i32>,
}

pub async fn run(ctx: &Context, query: Query) -> Result<()> {
    let prefs = ctx.load()?;
    let client = ctx.client(&prefs)?;
    let season = query.season.unwrap_or(prefs.season);

    let filter = default_filter(&query, &prefs.tracked);

    let spinner = create_spinner(format!("Fetching {season} games ({filter})"));
    let result = client.fetch_games(season, &filter).await;
    spinner.finish_and_clear();

    let games = select(result?, &query);

    if games.is_empty() {
        println!("{}", "No games found".dimmed());
        return Ok(());
    }

    println!("{}", schedule_header());
    for game in &games {
        println!("{}", game.render());
    }

    Ok(())
}

/// Flags first, then the first tracked team, then the first tracked
/// conference, else all FBS.
fn default_filter(query: &Query, tracked: &TrackingSelection) -> GameFilter {
    if let Some(name) = &query.team {
        GameFilter::Team(name.clone())
    } else if let Some(name) = &query.conference {
        GameFilter::Conference(name.clone())
    } else if let Some(team) = tracked.teams.iter().next() {
        GameFilter::Team(team.clone())
    } else if let Some(conference) = tracked.conferences.iter().next() {
        GameFilter::Conference(conference.clone())
    } else {
        GameFilter::AllFbs
    }
}

fn select(games: Vec<GameRecord>, query: &Query) -> Vec<GameRecord> {
    let now = Utc::now();
    games
        .into_iter()
        .filter(|g| query.week.is_none_or(|w| g.week == w))
        .filter(|g| !query.upcoming || (!g.completed && g.kickoff >= now))
        .take(query.limit)
        .collect()
}
