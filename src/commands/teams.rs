use anyhow::Result;
use cfb_cal_core::provider::{GameProvider, Team};
use owo_colors::OwoColorize;

use super::{Context, create_spinner};
use crate::render::{Render, pluralize};

pub async fn run(ctx: &Context, search: Option<&str>, season: Option<i32>) -> Result<()> {
    let prefs = ctx.load()?;
    let client = ctx.client(&prefs)?;
    let season = season.unwrap_or(prefs.season);

    let spinner = create_spinner(format!("Fetching {season} FBS teams"));
    let result = client.teams(season).await;
    spinner.finish_and_clear();
    let teams = result?;

    let shown: Vec<&Team> = teams
        .iter()
        .filter(|t| search.is_none_or(|needle| matches_search(t, needle)))
        .collect();

    if shown.is_empty() {
        println!("{}", "No matching teams".dimmed());
        return Ok(());
    }

    for team in &shown {
        println!("{}", team.render());
    }
    println!(
        "\n{}",
        format!("{} {}", shown.len(), pluralize("team", shown.len())).dimmed()
    );

    Ok(())
}

fn matches_search(team: &Team, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [
        Some(team.school.as_str()),
        team.mascot.as_deref(),
        team.abbreviation.as_deref(),
        team.conference.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}
