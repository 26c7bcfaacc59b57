use anyhow::Result;
use cfb_cal_core::calendar::{Scope, publish};
use cfb_cal_core::config::TrackingSelection;
use cfb_cal_core::sync::{collect_scoped_games, plan_documents, scopes_for};
use owo_colors::OwoColorize;

use super::{Context, create_spinner};
use crate::render::{Render, pluralize};

pub async fn run(
    ctx: &Context,
    teams: Vec<String>,
    conferences: Vec<String>,
    all_fbs: bool,
    season: Option<i32>,
) -> Result<()> {
    let prefs = ctx.load()?;

    // Explicit flags replace the stored selection for this run only.
    let scopes: Vec<Scope> = if teams.is_empty() && conferences.is_empty() && !all_fbs {
        scopes_for(&prefs.tracked)
    } else {
        let mut selection = TrackingSelection::default();
        for team in &teams {
            selection.add_team(team);
        }
        for conference in &conferences {
            selection.add_conference(conference);
        }
        selection.set_track_all_fbs(all_fbs);
        scopes_for(&selection)
    };

    if scopes.is_empty() {
        anyhow::bail!(
            "Nothing to sync.\n\n\
            Track something first:\n  \
            cfb-cal track \"Ohio State\"\n  \
            cfb-cal track --conference SEC"
        );
    }

    let client = ctx.client(&prefs)?;
    let season = season.unwrap_or(prefs.season);
    let options = &prefs.calendar;

    let spinner = create_spinner(format!(
        "Fetching {season} schedules for {} {}",
        scopes.len(),
        pluralize("scope", scopes.len())
    ));
    let result = collect_scoped_games(&client, season, &scopes).await;
    spinner.finish_and_clear();
    let scoped = result?;

    for entry in &scoped {
        println!(
            "{} {}",
            entry.scope.render(),
            format!("{} {}", entry.games.len(), pluralize("game", entry.games.len())).dimmed()
        );
    }

    let plans = plan_documents(&scoped, options);
    let report = publish(&plans, &options.output_path());

    println!();
    for path in &report.written {
        println!("{} {}", "✓".green(), path.display());
    }
    for err in &report.failed {
        println!("{} {}", "✗".red(), err.to_string().red());
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} calendar {} could not be written",
            report.failed.len(),
            plans.len(),
            pluralize("file", plans.len())
        );
    }

    Ok(())
}
