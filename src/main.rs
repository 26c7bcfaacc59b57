mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::Context;

#[derive(Parser)]
#[command(name = "cfb-cal")]
#[command(version, about = "Track college football schedules and publish them as calendar subscriptions")]
struct Cli {
    /// Preference file (defaults to the platform config directory)
    #[arg(long, global = true, env = "CFB_CAL_CONFIG")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the API key, season and output directory
    Init {
        /// College Football Data API key (prompted for when omitted)
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        season: Option<i32>,

        /// Where calendar files are written
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Overwrite an existing preference file
        #[arg(long)]
        force: bool,
    },
    /// List FBS teams
    Teams {
        /// Only teams whose name, mascot or conference contains this
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        season: Option<i32>,
    },
    /// List FBS conferences
    Conferences,
    /// Start tracking a team (or a conference with --conference)
    Track {
        name: Option<String>,

        /// Treat NAME as a conference
        #[arg(short, long)]
        conference: bool,

        /// Track every FBS game
        #[arg(long, conflicts_with = "name")]
        all_fbs: bool,
    },
    /// Stop tracking a team (or a conference with --conference)
    Untrack {
        name: Option<String>,

        #[arg(short, long)]
        conference: bool,

        #[arg(long, conflicts_with = "name")]
        all_fbs: bool,
    },
    /// Show configuration, tracked scopes and published files
    Status,
    /// Fetch schedules and write calendar files
    Sync {
        /// Sync these teams instead of the tracked selection
        #[arg(short, long = "team")]
        teams: Vec<String>,

        /// Sync these conferences instead of the tracked selection
        #[arg(short, long = "conference")]
        conferences: Vec<String>,

        #[arg(long)]
        all_fbs: bool,

        #[arg(long)]
        season: Option<i32>,
    },
    /// Print a schedule table
    Schedule {
        #[arg(short, long)]
        team: Option<String>,

        #[arg(short, long, conflicts_with = "team")]
        conference: Option<String>,

        #[arg(short, long)]
        week: Option<u32>,

        /// Only games that have not kicked off yet
        #[arg(short, long)]
        upcoming: bool,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        #[arg(long)]
        season: Option<i32>,
    },
    /// Export the tracked selection as JSON
    Export {
        /// Output file (stdout when omitted)
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new(cli.config)?;
    tracing::debug!(config = %ctx.store.path().display(), "using preference file");

    match cli.command {
        Commands::Init {
            api_key,
            season,
            output_dir,
            force,
        } => commands::init::run(&ctx, api_key, season, output_dir, force).await,
        Commands::Teams { search, season } => {
            commands::teams::run(&ctx, search.as_deref(), season).await
        }
        Commands::Conferences => commands::conferences::run(),
        Commands::Track {
            name,
            conference,
            all_fbs,
        } => commands::track::run(&ctx, name.as_deref(), conference, all_fbs).await,
        Commands::Untrack {
            name,
            conference,
            all_fbs,
        } => commands::untrack::run(&ctx, name.as_deref(), conference, all_fbs).await,
        Commands::Status => commands::status::run(&ctx),
        Commands::Sync {
            teams,
            conferences,
            all_fbs,
            season,
        } => commands::sync::run(&ctx, teams, conferences, all_fbs, season).await,
        Commands::Schedule {
            team,
            conference,
            week,
            upcoming,
            limit,
            season,
        } => {
            let query = commands::schedule::Query {
                team,
                conference,
                week,
                upcoming,
                limit,
                season,
            };
            commands::schedule::run(&ctx, query).await
        }
        Commands::Export { output } => commands::export::run(&ctx, output.as_deref()),
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
