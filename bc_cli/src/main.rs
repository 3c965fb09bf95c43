//! Command-line front end for the beach club calendar and bags tournaments.
//!
//! Calendar commands merge the events API, the built-in band schedule and
//! scheduled bags tournaments. Tournament commands drive a live bracket that
//! is saved to the JSON store after every change.

use anyhow::{Context, Result};
use bc_cli::{app::App, commands::parse_command, config::CliConfig};
use log::debug;
use pico_args::Arguments;
use std::path::PathBuf;

const HELP: &str = "\
Beach club events and bags tournaments

USAGE:
  bc [OPTIONS] COMMAND

COMMANDS:
  upcoming [--limit N]              Upcoming events  [default: 5]
  events                            Every event, in load order
  refresh                           Reload all event sources
  tournament new --size 4|8         Start a new roster
  tournament add NAME               Add a player to the roster
  tournament start                  Seed the bracket
  tournament score MATCH SIDE DELTA Add DELTA points for player1|player2
  tournament advance                Move to the next round
  tournament show                   Print the bracket
  tournament reset [--size 4|8]     Discard the bracket
  schedule add --name NAME --date YYYY-MM-DD [--time T] [--size 4|8] [--description D]
                                    Put a bags tournament on the calendar
  schedule remove ID                Remove a scheduled tournament

OPTIONS:
  --store PATH              JSON store file  [default: env BEACH_CLUB_STORE or beach_club_store.json]

FLAGS:
  -h, --help                Print help information

ENVIRONMENT:
  EVENTS_API_URL            Events API base URL (no API source when unset)
  HTTP_TIMEOUT_SECS         Events API timeout  [default: 10]
  EVENTS_CACHE_TTL_SECS     Events cache lifetime  [default: 60]
  SCHEDULE_REFERENCE_YEAR   Year for band schedule dates  [default: 2025]
  SCHEDULE_STRICT_DATES     Reject the band schedule on a bad date  [default: false]
  BAGS_TOURNAMENTS_KEY      Store key for scheduled tournaments
  RUST_LOG                  Log filter  [default: warn]
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let store: Option<PathBuf> = pargs.opt_value_from_str("--store")?;
    let command = parse_command(pargs)?;
    let config = CliConfig::from_env(store).context("Invalid configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let mut app = App::from_config(&config)?;
    let mut stdout = std::io::stdout().lock();
    app.execute(command, &mut stdout).await
}
