//! Configuration management for the playlist archiver.
//!
//! Two sources feed a run:
//!
//! 1. Credentials and API endpoints from environment variables. Values may
//!    come from a `.env` file in the working directory or in the local data
//!    directory; variables already set in the environment win.
//! 2. The playlist file, a TOML document mapping schedule groups to named
//!    playlist pairs.
//!
//! Both are read once in `main` and handed down explicitly; nothing in the
//! archive logic reads the environment.

use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{Error, Res, archive::DEFAULT_MAX_TRIES};

const APP_DIR: &str = "sparchive";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from `.env` files.
///
/// The file in the working directory is read first, then the one in the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/sparchive/.env`
/// - macOS: `~/Library/Application Support/sparchive/.env`
/// - Windows: `%LOCALAPPDATA%/sparchive/.env`
///
/// Neither file is required, since scheduled runs often get their
/// credentials from the environment directly. A file that exists but cannot
/// be parsed is an error.
pub fn load_env() -> Res<()> {
    let candidates = [PathBuf::from(".env"), app_dir().join(".env")];
    for path in candidates.iter().filter(|path| path.is_file()) {
        dotenv::from_path(path).map_err(|e| {
            Error::Configuration(format!("cannot load {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

/// Default location of the playlist file, `<data_local_dir>/sparchive/config.toml`.
pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Spotify credentials and endpoints for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// Needed only to create snapshot playlists.
    pub username: Option<String>,
    pub redirect_uri: Option<String>,
    pub api_url: String,
    pub token_url: String,
}

impl Credentials {
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds credentials from any key-value source, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| Error::Configuration(format!("{key} must be set")))
        };

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            refresh_token: required("SPOTIFY_REFRESH_TOKEN")?,
            username: optional("SPOTIFY_USER_ID"),
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI"),
            api_url: optional("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: optional("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
        })
    }
}

/// One source playlist archived into one all-time playlist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistConfig {
    pub source_playlist_id: String,
    pub archive_playlist_id: String,
    /// Number of recommendations appended per run; 0 disables them.
    #[serde(default)]
    pub recommendation_count: usize,
    #[serde(default)]
    pub seed_genres: Vec<String>,
    #[serde(default = "default_max_tries")]
    pub max_tries: usize,
    /// Name template of a dated copy of the source playlist, e.g.
    /// `"Discovered Week {date}"`.
    #[serde(default)]
    pub snapshot_name: Option<String>,
}

fn default_max_tries() -> usize {
    DEFAULT_MAX_TRIES
}

/// Named playlist pairs of one schedule group, in name order.
pub type Schedule = BTreeMap<String, PlaylistConfig>;

/// The playlist file: schedule groups such as `daily` or `weekly`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ArchiveConfig {
    pub schedules: BTreeMap<String, Schedule>,
}

impl ArchiveConfig {
    pub async fn load(path: &Path) -> Res<Self> {
        let content = async_fs::read_to_string(path).await.map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Res<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the playlists of `name`; unknown names are configuration errors.
    pub fn schedule(&self, name: &str) -> Res<&Schedule> {
        self.schedules.get(name).ok_or_else(|| {
            let known = self
                .schedules
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            Error::Configuration(format!("unknown schedule {name} (known: {known})"))
        })
    }
}
