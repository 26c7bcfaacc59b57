use std::path::PathBuf;

use anyhow::Result;
use cfb_cal_core::config::ApiKeySource;
use cfb_cal_core::constants::API_KEY_ENV;
use cfb_cal_core::provider::CfbdClient;
use dialoguer::Password;
use owo_colors::OwoColorize;

use super::{Context, create_spinner};

pub async fn run(
    ctx: &Context,
    api_key: Option<String>,
    season: Option<i32>,
    output_dir: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    if ctx.store.exists() && !force {
        anyhow::bail!(
            "Already initialized at {}.\n\
            Run `cfb-cal init --force` to reconfigure.",
            ctx.store.path().display()
        );
    }

    let mut prefs = ctx.load()?;

    // Key precedence: flag, then environment, then prompt.
    let key = match api_key {
        Some(k) => ApiKeySource::ConfigFile(k),
        None => match prefs.api_key() {
            Some(ApiKeySource::Environment(k)) => ApiKeySource::Environment(k),
            _ => {
                println!(
                    "Get a free API key at {}",
                    "https://collegefootballdata.com/key".cyan()
                );
                let entered = Password::new().with_prompt("  API key").interact()?;
                ApiKeySource::ConfigFile(entered.trim().to_string())
            }
        },
    };

    if key.key().trim().is_empty() {
        anyhow::bail!("An API key is required");
    }

    let client = CfbdClient::new(key.key())?;
    let spinner = create_spinner("Verifying API key".to_string());
    let verified = client.verify().await;
    spinner.finish_and_clear();
    verified?;
    println!("{} API key verified", "✓".green());

    match key {
        ApiKeySource::ConfigFile(k) => prefs.cfbd_api_key = Some(k),
        ApiKeySource::Environment(_) => {
            println!("  Using {API_KEY_ENV} from the environment; it will not be saved.");
        }
    }

    if let Some(season) = season {
        prefs.season = season;
    }
    if let Some(dir) = output_dir {
        prefs.calendar.output_dir = dir;
    }

    ctx.store.save(&prefs)?;

    println!("\nSaved {}", ctx.store.path().display());
    println!("  Season:     {}", prefs.season);
    println!("  Output dir: {}", prefs.calendar.output_path().display());
    println!("\nNext: `cfb-cal track <team>` then `cfb-cal sync`.");

    Ok(())
}
