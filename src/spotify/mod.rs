//! # Spotify Integration Module
//!
//! Implements [`PlaylistProvider`] against the Spotify Web API. It is the only
//! place that performs HTTP requests for playlist data; the archive logic
//! above it works on plain snapshots.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Archive)
//!          ↓
//! PlaylistProvider (trait)
//!          ↓
//! SpotifyClient
//!     ├── Playlist Operations (Items, Add, Remove, Details, Create)
//!     └── Recommendations
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Every non-success status becomes an [`Error::Provider`] carrying the
//! request URL, status and response body. Requests are not retried: a failed
//! call aborts the playlist being processed and the next run starts over
//! from a fresh fetch.
//!
//! ## Authentication
//!
//! Requests carry a bearer token from [`TokenManager`], which refreshes it
//! from the configured refresh token when it is about to expire.

pub mod playlist;
pub mod recommendations;

use reqwest::{Client, Response};
use tokio::sync::Mutex;

use crate::{
    Error, Res,
    config::Credentials,
    management::TokenManager,
    provider::PlaylistProvider,
    types::{Page, RecommendationRequest, RemovalInstruction, TrackRecord},
};

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    username: Option<String>,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            api_url: credentials.api_url.clone(),
            username: credentials.username.clone(),
            tokens: Mutex::new(TokenManager::new(credentials)),
        }
    }

    async fn token(&self) -> Res<String> {
        self.tokens.lock().await.get_valid_token(&self.http).await
    }
}

/// Turns a non-success response into a provider error.
pub(crate) async fn check_status(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .map(|value| format!(" (retry after {value}s)"))
        .unwrap_or_default();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Provider(format!(
        "{url} returned {status}{retry_after}: {body}"
    )))
}

pub(crate) fn track_uri(native_id: &str) -> String {
    format!("spotify:track:{native_id}")
}

impl PlaylistProvider for SpotifyClient {
    async fn fetch_page(&self, playlist_id: &str, page_token: Option<&str>) -> Res<Page> {
        let token = self.token().await?;
        playlist::get_items_page(&self.http, &self.api_url, &token, playlist_id, page_token).await
    }

    async fn append_items(&self, playlist_id: &str, native_ids: &[String]) -> Res<()> {
        let token = self.token().await?;
        playlist::add_tracks(&self.http, &self.api_url, &token, playlist_id, native_ids).await
    }

    async fn remove_occurrences(
        &self,
        playlist_id: &str,
        removals: &[RemovalInstruction],
    ) -> Res<()> {
        let token = self.token().await?;
        playlist::remove_occurrences(&self.http, &self.api_url, &token, playlist_id, removals)
            .await
    }

    async fn set_description(&self, playlist_id: &str, text: &str) -> Res<()> {
        let token = self.token().await?;
        playlist::change_description(&self.http, &self.api_url, &token, playlist_id, text).await
    }

    async fn get_recommendations(&self, request: &RecommendationRequest) -> Res<Vec<TrackRecord>> {
        let token = self.token().await?;
        recommendations::get_recommendations(&self.http, &self.api_url, &token, request).await
    }

    async fn find_playlist_by_name(&self, name: &str) -> Res<Option<String>> {
        let token = self.token().await?;
        playlist::find_by_name(&self.http, &self.api_url, &token, name).await
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Res<String> {
        let username = self.username.as_deref().ok_or_else(|| {
            Error::Configuration("SPOTIFY_USER_ID must be set to create playlists".to_string())
        })?;
        let token = self.token().await?;
        playlist::create(&self.http, &self.api_url, &token, username, name, description).await
    }
}
