use anyhow::Result;
use cfb_cal_core::calendar::Scope;
use cfb_cal_core::conferences;
use cfb_cal_core::provider::GameProvider;
use owo_colors::OwoColorize;

use super::{Context, create_spinner};
use crate::render::Render;

pub async fn run(ctx: &Context, name: Option<&str>, conference: bool, all_fbs: bool) -> Result<()> {
    if all_fbs {
        let changed = ctx.store.update(|p| p.tracked.set_track_all_fbs(true))?;
        report(&Scope::AllFbs, changed);
        return Ok(());
    }

    let Some(name) = name else {
        anyhow::bail!("Name a team or conference to track, or pass --all-fbs");
    };

    let scope = if conference {
        let conf = conferences::resolve(name)?;
        Scope::Conference(conf.abbreviation.to_string())
    } else {
        let prefs = ctx.load()?;
        let client = ctx.client(&prefs)?;

        let spinner = create_spinner(format!("Looking up {name}"));
        let result = client.resolve_team(prefs.season, name).await;
        spinner.finish_and_clear();
        Scope::Team(result?.school)
    };

    let added = ctx.store.update(|p| match &scope {
        Scope::Team(school) => p.tracked.add_team(school),
        Scope::Conference(abbr) => p.tracked.add_conference(abbr),
        Scope::AllFbs | Scope::AllTracked => false,
    })?;
    report(&scope, added);

    Ok(())
}

fn report(scope: &Scope, added: bool) {
    if added {
        println!("{} Now tracking {}", "+".green(), scope.render());
    } else {
        println!("{} {}", scope.render(), "is already tracked".dimmed());
    }
}
