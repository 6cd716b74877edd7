use thiserror::Error;

/// Error kinds for archive and deduplication runs.
///
/// The kind decides how far a failure reaches:
///
/// - [`Error::Configuration`] is raised before any provider call and ends the run.
/// - [`Error::InvalidRequest`] and [`Error::Provider`] abort the playlist being
///   processed; the run moves on to the next configured playlist.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown schedule, missing credential or an unreadable playlist file.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Recommendation parameters out of bounds (seed count, limit).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any failed network or API call: fetch, append, remove, update.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Provider(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl Error {
    /// Whether this error should stop the whole run instead of one playlist.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
