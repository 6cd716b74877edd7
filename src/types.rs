use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Res};

/// Maximum number of seeds (tracks and genres combined) per recommendation request.
pub const MAX_SEEDS: usize = 5;

/// Maximum number of tracks a single recommendation request may ask for.
pub const MAX_RECOMMENDATION_LIMIT: usize = 100;

/// Identifiers shared by playlist slots and loose tracks.
///
/// The merge logic only needs both ids of a track, regardless of whether it
/// comes from a playlist snapshot or a recommendation batch.
pub trait TrackIdentity {
    fn native_id(&self) -> &str;
    fn external_id(&self) -> Option<&str>;
}

/// One playlist slot, as seen in a single fetched snapshot.
///
/// `position` is only meaningful within the snapshot it was fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub external_id: Option<String>,
    pub native_id: String,
    pub position: usize,
    pub added_at: DateTime<Utc>,
}

impl TrackIdentity for TrackEntry {
    fn native_id(&self) -> &str {
        &self.native_id
    }

    fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }
}

/// A track that is not bound to a playlist slot, e.g. a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub native_id: String,
    pub external_id: Option<String>,
}

impl TrackIdentity for TrackRecord {
    fn native_id(&self) -> &str {
        &self.native_id
    }

    fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }
}

/// Remove the occurrences of `native_id` at exactly `positions`.
///
/// Removing by id alone would drop every occurrence of the track, including
/// the one that should survive. `positions` is never empty: the only
/// constructor is [`RemovalInstruction::single`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalInstruction {
    pub native_id: String,
    positions: Vec<usize>,
}

impl RemovalInstruction {
    pub fn single(native_id: impl Into<String>, position: usize) -> Self {
        Self {
            native_id: native_id.into(),
            positions: vec![position],
        }
    }

    /// Snapshot positions of the occurrences to remove.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Highest position this instruction touches.
    pub fn last_position(&self) -> usize {
        // positions is non-empty, so the default is never used
        self.positions.iter().copied().max().unwrap_or_default()
    }
}

/// One raw playlist slot returned by the provider.
///
/// `track` is `None` for slots that cannot be archived: unavailable catalog
/// items, local files and podcast episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSlot {
    pub track: Option<TrackRecord>,
    pub added_at: Option<DateTime<Utc>>,
}

/// One page of playlist slots plus the token of the following page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<PlaylistSlot>,
    pub next: Option<String>,
}

/// A validated recommendation request.
///
/// The only way to build one is [`RecommendationRequest::new`], so a provider
/// never sees seed or limit values outside of the documented bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    seed_tracks: Vec<String>,
    seed_genres: Vec<String>,
    limit: usize,
}

impl RecommendationRequest {
    /// Builds a request, checking its bounds.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRequest`] when `limit` exceeds [`MAX_RECOMMENDATION_LIMIT`],
    /// when there is no seed at all, or when tracks and genres together exceed
    /// [`MAX_SEEDS`].
    pub fn new(seed_tracks: Vec<String>, seed_genres: Vec<String>, limit: usize) -> Res<Self> {
        if limit > MAX_RECOMMENDATION_LIMIT {
            return Err(Error::InvalidRequest(format!(
                "limit must be less than or equal to {MAX_RECOMMENDATION_LIMIT}, got {limit}"
            )));
        }
        if seed_tracks.is_empty() && seed_genres.is_empty() {
            return Err(Error::InvalidRequest(
                "at least one seed track or genre is required".to_string(),
            ));
        }
        let seeds = seed_tracks.len() + seed_genres.len();
        if seeds > MAX_SEEDS {
            return Err(Error::InvalidRequest(format!(
                "total number of seeds must be less than or equal to {MAX_SEEDS}, got {seeds}"
            )));
        }

        Ok(Self {
            seed_tracks,
            seed_genres,
            limit,
        })
    }

    pub fn seed_tracks(&self) -> &[String] {
        &self.seed_tracks
    }

    pub fn seed_genres(&self) -> &[String] {
        &self.seed_genres
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Access token of the current run together with the refresh token that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Response of the refresh-token grant. Spotify may omit a rotated refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

/// A playlist item. `track` is null for unavailable items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<DateTime<Utc>>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    pub isrc: Option<String>,
}

/// Track or episode object as returned in playlist items and recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub external_ids: ExternalIds,
}

impl Track {
    /// Converts an API track into a [`TrackRecord`], dropping anything that
    /// cannot be added to or removed from a playlist by id.
    pub fn into_record(self) -> Option<TrackRecord> {
        if self.is_local || self.kind.as_deref().is_some_and(|kind| kind != "track") {
            return None;
        }
        Some(TrackRecord {
            native_id: self.id?,
            external_id: self.external_ids.isrc,
        })
    }
}

impl From<PlaylistItemsResponse> for Page {
    fn from(res: PlaylistItemsResponse) -> Self {
        Page {
            items: res
                .items
                .into_iter()
                .map(|item| PlaylistSlot {
                    track: item.track.and_then(Track::into_record),
                    added_at: item.added_at,
                })
                .collect(),
            next: res.next,
        }
    }
}

/// Response of `GET /recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

/// Body of `POST /playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Body of `DELETE /playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksFromPlaylistRequest {
    pub tracks: Vec<TrackOccurrence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackOccurrence {
    pub uri: String,
    pub positions: Vec<usize>,
}

/// Returned by every call that modifies playlist items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePlaylistDetailsRequest {
    pub description: String,
}

/// Body of `POST /users/{user_id}/playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

/// One page of `GET /me/playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}
