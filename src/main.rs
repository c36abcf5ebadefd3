use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use figma_files::app::App;
use figma_files::cache::{self, CacheStore};
use figma_files::config::Config;
use figma_files::controller::ViewController;
use figma_files::error::{FigmaError, Result};
use figma_files::event::EventHandler;
use figma_files::fetcher::Fetcher;
use figma_files::figma::FigmaClient;
use figma_files::logging;

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "figma-files")]
#[command(about = "Browse a Figma team's projects, files, and pages")]
#[command(version)]
struct Args {
    /// Figma team ID
    #[arg(long, env = "FIGMA_TEAM_ID")]
    team_id: Option<String>,

    /// Directory for cached listings (default: platform cache directory)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Development mode: enables clearing the cache with `X`
    #[arg(long)]
    dev: bool,

    /// Remove every cached listing and exit
    #[arg(long)]
    clear_cache: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match cache::data_dir() {
        Some(dir) => match logging::init(&dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("figma-files: logging disabled: {}", e);
                None
            }
        },
        None => None,
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting");
            eprintln!("figma-files: {}", e);
            exit_code(&e)
        }
    }
}

/// Exit status for a fatal error: 2 for missing configuration, 1 otherwise.
fn exit_code(error: &FigmaError) -> ExitCode {
    if error.is_configuration() {
        eprintln!("Run with --help for the required settings.");
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

async fn run(args: Args) -> Result<()> {
    let cache = match args.cache_dir {
        Some(dir) => CacheStore::new(dir),
        None => CacheStore::open_default()?,
    };

    if args.clear_cache {
        cache.clear_all()?;
        info!(dir = %cache.root().display(), "cleared cache");
        println!("Cleared cache at {}", cache.root().display());
        return Ok(());
    }

    // Configuration errors are fatal before anything is fetched
    let config = Config::from_env(args.team_id)?;
    info!(team_id = %config.team_id, dev = args.dev, "starting");

    let client = FigmaClient::new(&config.token)?;

    let mut events = EventHandler::new();
    let fetcher = Arc::new(Fetcher::new(
        Arc::new(client),
        Arc::new(events.sender()),
        config.team_id.clone(),
    ));
    let controller = ViewController::new(cache, fetcher, events.sender());
    let mut app = App::new(controller, events.sender(), config.team_id, args.dev);

    let mut terminal = ratatui::try_init()?;
    events.spawn_terminal_reader(TICK_RATE);
    let result = app.run(&mut terminal, &mut events).await;
    ratatui::restore();

    result.map_err(Into::into)
}
