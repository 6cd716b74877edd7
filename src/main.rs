use std::path::PathBuf;

use chrono::Local;
use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sparchive::{
    cli,
    config::{self, ArchiveConfig, Credentials},
    error, info,
    spotify::SpotifyClient,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Playlist file (defaults to config.toml in the local data directory)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Archive new tracks of every playlist in a schedule group
    Archive(ScheduleOptions),

    /// Remove duplicate recordings from the archive playlists of a schedule group
    Dedup(ScheduleOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ScheduleOptions {
    /// Schedule group to run, e.g. `daily` or `weekly`
    schedule: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Archive(opt) => {
            let (client, config) = prepare(cli.config, &opt.schedule).await;
            let schedule = schedule_or_exit(&config, &opt.schedule);
            let today = Local::now().date_naive();
            match cli::archive(&client, &opt.schedule, schedule, today).await {
                Ok(summary) if summary.is_success() => {}
                Ok(summary) => error!(
                    "{} of {} playlists failed: {}",
                    summary.failed.len(),
                    summary.failed.len() + summary.processed.len(),
                    summary.failed.join(", ")
                ),
                Err(e) => error!("{}", e),
            }
        }
        Command::Dedup(opt) => {
            let (client, config) = prepare(cli.config, &opt.schedule).await;
            let schedule = schedule_or_exit(&config, &opt.schedule);
            match cli::deduplicate(&client, schedule).await {
                Ok(summary) if summary.is_success() => {}
                Ok(summary) => error!(
                    "Deduplication failed for: {}",
                    summary.failed.join(", ")
                ),
                Err(e) => error!("{}", e),
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

/// Loads everything a run needs and exits on configuration errors, before
/// any request reaches Spotify.
async fn prepare(config_path: Option<PathBuf>, schedule_name: &str) -> (SpotifyClient, ArchiveConfig) {
    if let Err(e) = config::load_env() {
        error!("Cannot load environment. Err: {}", e);
    }

    let path = config_path.unwrap_or_else(config::default_config_path);
    let archive_config = match ArchiveConfig::load(&path).await {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };
    let schedule = schedule_or_exit(&archive_config, schedule_name);

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };
    if let Err(e) = cli::preflight(schedule, &credentials) {
        error!("{}", e);
    }

    info!("Loading client");
    (SpotifyClient::new(credentials), archive_config)
}

fn schedule_or_exit<'a>(
    archive_config: &'a ArchiveConfig,
    schedule_name: &str,
) -> &'a config::Schedule {
    match archive_config.schedule(schedule_name) {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    }
}
