//! Game record to calendar event mapping.

use chrono::Duration;

use crate::config::CalendarOptions;
use crate::constants::{UID_DOMAIN, game_duration};
use crate::event::{CalendarEvent, EventTime, Reminder};
use crate::game::{GameRecord, SeasonType};

/// Stable UID for a game. Re-syncing an unchanged game must reproduce it
/// byte for byte so calendar clients update in place.
pub fn event_uid(game_id: u64) -> String {
    format!("cfb-game-{game_id}@{UID_DOMAIN}")
}

/// Map one game into its calendar event.
pub fn map_game(game: &GameRecord, options: &CalendarOptions) -> CalendarEvent {
    let (start, end) = if game.start_time_tbd {
        let day = game.local_date();
        (EventTime::Date(day), EventTime::Date(day + Duration::days(1)))
    } else {
        (
            EventTime::DateTime(game.kickoff),
            EventTime::DateTime(game.kickoff + game_duration()),
        )
    };

    let reminder = (options.reminder_minutes > 0 && !game.start_time_tbd).then(|| Reminder {
        minutes: i64::from(options.reminder_minutes),
    });

    CalendarEvent {
        uid: event_uid(game.id),
        summary: title(game, options),
        description: Some(description(game, options)),
        location: options
            .include_venue
            .then(|| game.venue.clone())
            .flatten(),
        start,
        end,
        reminder,
        categories: categories(game),
    }
}

fn title(game: &GameRecord, options: &CalendarOptions) -> String {
    let mut title = match &game.notes {
        Some(name) => format!("{}: {}", name, game.matchup()),
        None => game.matchup(),
    };

    if options.include_tv_info
        && let Some(network) = &game.network
    {
        title.push_str(&format!(" ({network})"));
    }

    title
}

fn description(game: &GameRecord, options: &CalendarOptions) -> String {
    let mut lines = vec![format!("Week {}, {} {}", game.week, game.season, game.season_type)];

    if options.include_venue
        && let Some(venue) = &game.venue
    {
        lines.push(format!("Venue: {venue}"));
    }
    if options.include_tv_info
        && let Some(network) = &game.network
    {
        lines.push(format!("TV: {network}"));
    }
    if let Some(score) = game.final_score() {
        lines.push(format!("Final: {score}"));
    }
    if game.conference_game {
        lines.push("Conference game".to_string());
    }
    if game.neutral_site {
        lines.push("Neutral site".to_string());
    }

    lines.join("\n")
}

fn categories(game: &GameRecord) -> Vec<String> {
    let mut categories = vec!["College Football".to_string()];
    if game.conference_game {
        categories.push("Conference".to_string());
    }
    if game.season_type == SeasonType::Postseason {
        categories.push("Bowl Game".to_string());
    }
    categories
}
