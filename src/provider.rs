//! The capability set the archive logic needs from a playlist service.
//!
//! [`crate::spotify::SpotifyClient`] implements it against the Spotify Web
//! API; tests implement it with canned pages.

use crate::{
    Res,
    types::{Page, RecommendationRequest, RemovalInstruction, TrackRecord},
};

/// Maximum number of items per append or removal call.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

#[allow(async_fn_in_trait)]
pub trait PlaylistProvider {
    /// Fetches one page of a playlist. `page_token` is `None` for the first page.
    async fn fetch_page(&self, playlist_id: &str, page_token: Option<&str>) -> Res<Page>;

    /// Appends tracks in the given order. At most [`MAX_ITEMS_PER_REQUEST`] ids.
    async fn append_items(&self, playlist_id: &str, native_ids: &[String]) -> Res<()>;

    /// Removes exactly the listed occurrences. At most [`MAX_ITEMS_PER_REQUEST`] instructions.
    async fn remove_occurrences(
        &self,
        playlist_id: &str,
        removals: &[RemovalInstruction],
    ) -> Res<()>;

    async fn set_description(&self, playlist_id: &str, text: &str) -> Res<()>;

    async fn get_recommendations(&self, request: &RecommendationRequest) -> Res<Vec<TrackRecord>>;

    /// Looks up one of the current user's playlists by exact name.
    async fn find_playlist_by_name(&self, name: &str) -> Res<Option<String>>;

    /// Creates a private playlist for the current user and returns its id.
    async fn create_playlist(&self, name: &str, description: &str) -> Res<String>;
}
