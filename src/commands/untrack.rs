use std::collections::BTreeSet;

use anyhow::Result;
use cfb_cal_core::calendar::Scope;
use cfb_cal_core::config::Preferences;
use cfb_cal_core::conferences;
use cfb_cal_core::provider::{GameProvider, Team, resolve_team_name};
use owo_colors::OwoColorize;

use super::{Context, create_spinner};
use crate::render::Render;

pub async fn run(ctx: &Context, name: Option<&str>, conference: bool, all_fbs: bool) -> Result<()> {
    if all_fbs {
        let changed = ctx.store.update(|p| p.tracked.set_track_all_fbs(false))?;
        report(changed.then_some(Scope::AllFbs), "all FBS");
        return Ok(());
    }

    let Some(name) = name else {
        anyhow::bail!("Name a team or conference to untrack, or pass --all-fbs");
    };

    let removed = if conference {
        // Conferences are stored by abbreviation.
        let key = conferences::resolve(name)
            .map(|c| c.abbreviation.to_string())
            .unwrap_or_else(|_| name.to_string());
        ctx.store
            .update(|p| p.tracked.remove_conference(&key))?
            .map(Scope::Conference)
    } else {
        let prefs = ctx.load()?;
        let stored_exactly = prefs
            .tracked
            .teams
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name.trim()));
        let teams = if stored_exactly {
            Vec::new()
        } else {
            lookup_teams(ctx, &prefs).await
        };

        match stored_team(&prefs.tracked.teams, &teams, name) {
            Some(school) => ctx
                .store
                .update(|p| p.tracked.remove_team(&school))?
                .map(Scope::Team),
            None => None,
        }
    };

    report(removed, name);
    Ok(())
}

/// Season teams for mascot and abbreviation matching. Empty when offline or
/// without a key; stored names still match then.
async fn lookup_teams(ctx: &Context, prefs: &Preferences) -> Vec<Team> {
    let Ok(client) = ctx.client(prefs) else {
        return Vec::new();
    };

    let spinner = create_spinner("Looking up teams".to_string());
    let result = client.teams(prefs.season).await;
    spinner.finish_and_clear();

    result.unwrap_or_else(|e| {
        tracing::warn!("Could not fetch teams, matching stored names only: {e}");
        Vec::new()
    })
}

/// The stored spelling `name` refers to, resolved the same way `track`
/// resolves names but only among tracked schools.
fn stored_team(tracked: &BTreeSet<String>, teams: &[Team], name: &str) -> Option<String> {
    let candidates: Vec<Team> = tracked
        .iter()
        .map(|school| {
            teams
                .iter()
                .find(|t| t.school.eq_ignore_ascii_case(school))
                .cloned()
                .map(|t| Team {
                    school: school.clone(),
                    ..t
                })
                .unwrap_or_else(|| Team {
                    school: school.clone(),
                    mascot: None,
                    abbreviation: None,
                    conference: None,
                })
        })
        .collect();

    resolve_team_name(&candidates, name)
        .ok()
        .map(|t| t.school.clone())
}

fn report(removed: Option<Scope>, name: &str) {
    match removed {
        Some(scope) => println!("{} Stopped tracking {}", "-".red(), scope.render()),
        None => println!("{}", format!("'{name}' is not tracked").dimmed()),
    }
}
