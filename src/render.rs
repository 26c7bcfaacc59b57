//! Terminal rendering for cfb-cal-core types.
//!
//! Extension traits that add colored output using owo_colors.

use cfb_cal_core::calendar::Scope;
use cfb_cal_core::conferences::Conference;
use cfb_cal_core::game::{GameRecord, SeasonType};
use cfb_cal_core::provider::Team;
use chrono_tz::America::New_York;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Scope {
    fn render(&self) -> String {
        match self {
            Scope::Team(name) => format!("🏈 {}", name.bold()),
            Scope::Conference(abbr) => format!("🏟  {}", abbr.bold()),
            Scope::AllFbs => format!("🌎 {}", "All FBS".bold()),
            Scope::AllTracked => format!("📅 {}", "All tracked".bold()),
        }
    }
}

impl Render for Team {
    fn render(&self) -> String {
        let conference = self.conference.as_deref().unwrap_or("-");
        let mascot = self.mascot.as_deref().unwrap_or("");
        format!(
            "{:<28} {:<22} {}",
            self.school,
            mascot.dimmed(),
            conference.cyan()
        )
    }
}

impl Render for Conference {
    fn render(&self) -> String {
        format!("{:<6} {}", self.abbreviation.bold(), self.full_name)
    }
}

/// Kickoff as US Eastern time, the way schedules are published.
pub fn kickoff(game: &GameRecord) -> String {
    let eastern = game.kickoff.with_timezone(&New_York);
    if game.start_time_tbd {
        format!("{} TBD", eastern.format("%a %b %e"))
    } else {
        eastern.format("%a %b %e %l:%M %p ET").to_string()
    }
}

pub fn week_label(game: &GameRecord) -> String {
    match game.season_type {
        SeasonType::Regular => game.week.to_string(),
        SeasonType::Postseason => "Bowl".to_string(),
    }
}

impl Render for GameRecord {
    fn render(&self) -> String {
        let matchup = match &self.notes {
            Some(name) => format!("{} ({})", self.matchup(), name),
            None => self.matchup(),
        };
        let network = self.network.as_deref().unwrap_or("-");
        let score = match self.final_score() {
            Some(score) => score.green().to_string(),
            None => "".to_string(),
        };

        format!(
            "{:>4}  {:<24} {:<52} {:<10} {}",
            week_label(self),
            kickoff(self).dimmed(),
            matchup,
            network.yellow(),
            score
        )
    }
}

pub fn schedule_header() -> String {
    format!(
        "{:>4}  {:<24} {:<52} {:<10} {}",
        "Week", "Kickoff", "Matchup", "TV", "Score"
    )
    .bold()
    .to_string()
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
