//! Spotify Playlist Archiver Library
//!
//! This library archives tracks from rotating Spotify playlists (weekly
//! discovery mixes, release radars, ...) into persistent "all-time" playlists,
//! removes duplicate recordings from those playlists and optionally appends
//! recommendations. Every run is a single batch pass over a configured
//! schedule group.
//!
//! # Modules
//!
//! - `archive` - Fetching, merging, recommendation and deduplication logic
//! - `cli` - Command implementations driving one pass per playlist
//! - `config` - Credentials from the environment and the playlist file
//! - `error` - Error kinds shared by all modules
//! - `management` - Access token lifecycle
//! - `provider` - The playlist provider capability trait
//! - `spotify` - Spotify Web API implementation of the provider
//! - `types` - Data structures and type definitions
//! - `utils` - Chunking and formatting helpers
//!
//! # Example
//!
//! ```
//! use sparchive::{archive, types::TrackEntry};
//!
//! let entries: Vec<TrackEntry> = Vec::new();
//! assert!(archive::find_duplicates(&entries).is_empty());
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod provider;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the [`Error`] kinds,
/// which lets the orchestration decide whether a failure is fatal for the
/// whole run or only for the playlist currently being processed.
///
/// # Example
///
/// ```
/// use sparchive::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Each line is prefixed with the local time so the output of scheduled
/// runs can be read back from cron or systemd logs.
///
/// # Example
///
/// ```
/// info!("Archiving {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::utils::log_timestamp().dimmed(), "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Archived {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::utils::log_timestamp().dimmed(), "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for failures that make the whole run pointless, such as an
/// unknown schedule or missing credentials. Failures scoped to one playlist
/// are reported with [`warning!`] instead so the run can go on.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("{} [{}] {}", $crate::utils::log_timestamp().dimmed(), "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Skipping playlist {}: {}", name, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("{} [{}] {}", $crate::utils::log_timestamp().dimmed(), "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
