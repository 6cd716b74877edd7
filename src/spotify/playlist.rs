use reqwest::Client;

use crate::{
    Error, Res,
    provider::MAX_ITEMS_PER_REQUEST,
    types::{
        AddTrackToPlaylistRequest, ChangePlaylistDetailsRequest, CreatePlaylistRequest,
        GetUserPlaylistsResponse, Page, Playlist, PlaylistItemsResponse,
        PlaylistSnapshotResponse, RemovalInstruction, RemoveTracksFromPlaylistRequest,
        TrackOccurrence,
    },
};

use super::{check_status, track_uri};

const PAGE_LIMIT: usize = 100;
const USER_PLAYLISTS_PAGE_LIMIT: usize = 50;

/// Fetches one page of playlist items.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `page_token` - `next` URL returned with the previous page, `None` for the first page
///
/// # Returns
///
/// A [`Page`] with one slot per playlist item. Local files, episodes and
/// unavailable tracks are kept as slots without a track.
///
/// # API Endpoint
///
/// `GET /playlists/{playlist_id}/tracks?limit=100&additional_types=track`
pub async fn get_items_page(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    page_token: Option<&str>,
) -> Res<Page> {
    // the token is the absolute `next` URL of the previous page
    let url = match page_token {
        Some(next) => next.to_string(),
        None => format!(
            "{api_url}/playlists/{playlist_id}/tracks?limit={PAGE_LIMIT}&additional_types=track"
        ),
    };

    let response = client.get(&url).bearer_auth(token).send().await?;
    let json = check_status(response)
        .await?
        .json::<PlaylistItemsResponse>()
        .await?;

    Ok(json.into())
}

/// Appends tracks to the end of a playlist, in the given order.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the target playlist
/// * `native_ids` - Track IDs to append, at most [`MAX_ITEMS_PER_REQUEST`]
///
/// # Errors
///
/// - [`Error::InvalidRequest`] for more than [`MAX_ITEMS_PER_REQUEST`] ids, before any request
/// - [`Error::Provider`] for network failures and non-success statuses
///
/// # API Endpoint
///
/// `POST /playlists/{playlist_id}/tracks` with `{"uris": [...]}`
pub async fn add_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    native_ids: &[String],
) -> Res<()> {
    if native_ids.len() > MAX_ITEMS_PER_REQUEST {
        return Err(Error::InvalidRequest(format!(
            "cannot add more than {MAX_ITEMS_PER_REQUEST} tracks at once, got {}",
            native_ids.len()
        )));
    }

    let api_url = format!("{api_url}/playlists/{playlist_id}/tracks");
    let body = AddTrackToPlaylistRequest {
        uris: native_ids.iter().map(|id| track_uri(id)).collect(),
    };

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    check_status(response)
        .await?
        .json::<PlaylistSnapshotResponse>()
        .await?;

    Ok(())
}

/// Removes track occurrences at exact positions.
///
/// Positions refer to the snapshot the instructions were computed from.
/// Other occurrences of the same track are left alone.
///
/// # Arguments
///
/// * `playlist_id` - Spotify ID of the playlist
/// * `removals` - At most [`MAX_ITEMS_PER_REQUEST`] instructions
///
/// # API Endpoint
///
/// `DELETE /playlists/{playlist_id}/tracks` with `{"tracks": [{"uri", "positions"}]}`
pub async fn remove_occurrences(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    removals: &[RemovalInstruction],
) -> Res<()> {
    if removals.len() > MAX_ITEMS_PER_REQUEST {
        return Err(Error::InvalidRequest(format!(
            "cannot remove more than {MAX_ITEMS_PER_REQUEST} tracks at once, got {}",
            removals.len()
        )));
    }

    let api_url = format!("{api_url}/playlists/{playlist_id}/tracks");
    let body = RemoveTracksFromPlaylistRequest {
        tracks: removals
            .iter()
            .map(|removal| TrackOccurrence {
                uri: track_uri(&removal.native_id),
                positions: removal.positions().to_vec(),
            })
            .collect(),
    };

    let response = client
        .delete(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    check_status(response)
        .await?
        .json::<PlaylistSnapshotResponse>()
        .await?;

    Ok(())
}

/// Replaces the description of a playlist.
///
/// # API Endpoint
///
/// `PUT /playlists/{playlist_id}` with `{"description": ...}`
pub async fn change_description(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    description: &str,
) -> Res<()> {
    let api_url = format!("{api_url}/playlists/{playlist_id}");
    let body = ChangePlaylistDetailsRequest {
        description: description.to_string(),
    };

    let response = client
        .put(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    check_status(response).await?;

    Ok(())
}

/// Looks up one of the current user's playlists by exact name.
///
/// Pages through `GET /me/playlists` 50 at a time and stops at the first match.
///
/// # Returns
///
/// - `Ok(Some(id))` - ID of the first playlist with that name
/// - `Ok(None)` - No playlist of the user has that name
pub async fn find_by_name(
    client: &Client,
    api_url: &str,
    token: &str,
    name: &str,
) -> Res<Option<String>> {
    let mut url = Some(format!(
        "{api_url}/me/playlists?limit={USER_PLAYLISTS_PAGE_LIMIT}"
    ));

    while let Some(page_url) = url {
        let response = client.get(&page_url).bearer_auth(token).send().await?;
        let page = check_status(response)
            .await?
            .json::<GetUserPlaylistsResponse>()
            .await?;

        if let Some(playlist) = page.items.into_iter().find(|p| p.name == name) {
            return Ok(Some(playlist.id));
        }
        url = page.next;
    }

    Ok(None)
}

/// Creates a private, non-collaborative playlist for `username`.
///
/// # Returns
///
/// The Spotify ID of the new playlist.
///
/// # API Endpoint
///
/// `POST /users/{username}/playlists`
pub async fn create(
    client: &Client,
    api_url: &str,
    token: &str,
    username: &str,
    name: &str,
    description: &str,
) -> Res<String> {
    let api_url = format!("{api_url}/users/{username}/playlists");
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    let playlist = check_status(response).await?.json::<Playlist>().await?;

    Ok(playlist.id)
}
