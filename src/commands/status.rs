use anyhow::Result;
use cfb_cal_core::calendar::CalendarDocument;
use cfb_cal_core::config::ApiKeySource;
use cfb_cal_core::constants::{API_KEY_ENV, FILE_PREFIX};
use cfb_cal_core::sync::scopes_for;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{Render, pluralize};

pub fn run(ctx: &Context) -> Result<()> {
    let prefs = ctx.load()?;

    println!("{}", "Configuration".bold());
    println!("   File:    {}", ctx.store.path().display());
    let key = match prefs.api_key() {
        Some(ApiKeySource::Environment(_)) => format!("from {API_KEY_ENV}").green().to_string(),
        Some(ApiKeySource::ConfigFile(_)) => "saved in config".green().to_string(),
        None => "not set (run `cfb-cal init`)".red().to_string(),
    };
    println!("   API key: {key}");
    println!("   Season:  {}", prefs.season);

    println!("\n{}", "Tracking".bold());
    let scopes = scopes_for(&prefs.tracked);
    if scopes.is_empty() {
        println!("   {}", "Nothing tracked yet".dimmed());
    }
    for scope in &scopes {
        println!("   {}", scope.render());
    }

    let options = &prefs.calendar;
    let output_dir = options.output_path();
    println!("\n{}", "Calendar".bold());
    println!("   Name:      {}", options.calendar_name);
    println!("   Output:    {}", output_dir.display());
    println!("   TV info:   {}", yes_no(options.include_tv_info));
    println!("   Venue:     {}", yes_no(options.include_venue));
    if options.reminder_minutes == 0 {
        println!("   Reminder:  off");
    } else {
        println!("   Reminder:  {} min before kickoff", options.reminder_minutes);
    }

    println!("\n{}", "Published".bold());
    let mut files: Vec<_> = std::fs::read_dir(&output_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.extension().is_some_and(|e| e == "ics")
                        && p.file_name()
                            .is_some_and(|n| n.to_string_lossy().starts_with(FILE_PREFIX))
                })
                .collect()
        })
        .unwrap_or_default();
    files.sort();

    if files.is_empty() {
        println!("   {}", "No calendars yet (run `cfb-cal sync`)".dimmed());
    }
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match CalendarDocument::read(&path) {
            Ok(doc) => {
                let count = doc.events.len();
                println!(
                    "   {:<28} {}",
                    name,
                    format!("{count} {}", pluralize("event", count)).dimmed()
                );
            }
            Err(e) => println!("   {:<28} {}", name, e.to_string().red()),
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
