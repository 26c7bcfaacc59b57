//! Sync orchestration: tracked scopes in, published calendar documents out.
//!
//! Everything is fetched before anything is written, so a provider failure or
//! an unknown name leaves the previously published files untouched.

use std::path::Path;

use tracing::info;

use crate::calendar::{CalendarDocument, PlannedDocument, PublishReport, Scope, publish};
use crate::config::{CalendarOptions, TrackingSelection};
use crate::conferences;
use crate::error::{CfbError, CfbResult};
use crate::game::GameRecord;
use crate::mapper::map_game;
use crate::provider::{GameFilter, GameProvider};

/// Games fetched for one resolved scope.
#[derive(Debug, Clone)]
pub struct ScopedGames {
    pub scope: Scope,
    pub games: Vec<GameRecord>,
}

/// The scopes a tracking selection asks for, in a stable order.
pub fn scopes_for(selection: &TrackingSelection) -> Vec<Scope> {
    let mut scopes: Vec<Scope> = selection
        .teams
        .iter()
        .map(|t| Scope::Team(t.clone()))
        .chain(selection.conferences.iter().map(|c| Scope::Conference(c.clone())))
        .collect();
    if selection.track_all_fbs {
        scopes.push(Scope::AllFbs);
    }
    scopes
}

/// Resolve each scope's name and fetch its games, one request after another.
///
/// Team scopes come back under the provider's spelling of the school,
/// conference scopes under the conference abbreviation.
pub async fn collect_scoped_games<P: GameProvider>(
    provider: &P,
    season: i32,
    scopes: &[Scope],
) -> CfbResult<Vec<ScopedGames>> {
    let mut collected = Vec::with_capacity(scopes.len());

    for scope in scopes {
        let (scope, filter) = match scope {
            Scope::Team(name) => {
                let team = provider.resolve_team(season, name).await?;
                (
                    Scope::Team(team.school.clone()),
                    GameFilter::Team(team.school),
                )
            }
            Scope::Conference(name) => {
                let conf = conferences::resolve(name)?;
                (
                    Scope::Conference(conf.abbreviation.to_string()),
                    GameFilter::Conference(conf.abbreviation.to_string()),
                )
            }
            Scope::AllFbs => (Scope::AllFbs, GameFilter::AllFbs),
            Scope::AllTracked => continue,
        };

        let games = provider.fetch_games(season, &filter).await?;
        info!(%scope, games = games.len(), "collected");
        collected.push(ScopedGames { scope, games });
    }

    Ok(collected)
}

/// Map every game and lay out the documents to publish: one per team, one
/// per conference, and the combined document last.
pub fn plan_documents(scoped: &[ScopedGames], options: &CalendarOptions) -> Vec<PlannedDocument> {
    let mut plans = Vec::new();
    let mut combined = Vec::new();

    for ScopedGames { scope, games } in scoped {
        let events: Vec<_> = games.iter().map(|g| map_game(g, options)).collect();
        combined.extend(events.iter().cloned());

        if scope.has_own_document() {
            plans.push(PlannedDocument {
                document: CalendarDocument::synthesize(
                    events,
                    &scope.document_name(&options.calendar_name),
                ),
                scope: scope.clone(),
            });
        }
    }

    plans.push(PlannedDocument {
        document: CalendarDocument::synthesize(
            combined,
            &Scope::AllTracked.document_name(&options.calendar_name),
        ),
        scope: Scope::AllTracked,
    });

    plans
}

/// Fetch, plan and publish in one go.
///
/// Returns `Err` only when nothing was written. Write failures are reported
/// per document in the returned report.
pub async fn sync<P: GameProvider>(
    provider: &P,
    season: i32,
    scopes: &[Scope],
    options: &CalendarOptions,
    output_dir: &Path,
) -> CfbResult<PublishReport> {
    if scopes.is_empty() {
        return Err(CfbError::Config(
            "nothing to track; add a team or conference first".into(),
        ));
    }

    let scoped = collect_scoped_games(provider, season, scopes).await?;
    let plans = plan_documents(&scoped, options);
    Ok(publish(&plans, output_dir))
}
