use reqwest::Client;

use crate::{
    Res,
    types::{RecommendationRequest, RecommendationsResponse, Track, TrackRecord},
};

use super::check_status;

/// Requests track recommendations for the given seeds.
///
/// Only non-empty seed lists are sent. The request has already been checked
/// against the seed and limit bounds by [`RecommendationRequest::new`].
///
/// # Returns
///
/// The recommended tracks in response order, without tracks that have no ID.
///
/// # API Endpoint
///
/// `GET /recommendations?limit=..&seed_tracks=..&seed_genres=..`
pub async fn get_recommendations(
    client: &Client,
    api_url: &str,
    token: &str,
    request: &RecommendationRequest,
) -> Res<Vec<TrackRecord>> {
    let mut query = vec![("limit", request.limit().to_string())];
    if !request.seed_tracks().is_empty() {
        query.push(("seed_tracks", request.seed_tracks().join(",")));
    }
    if !request.seed_genres().is_empty() {
        query.push(("seed_genres", request.seed_genres().join(",")));
    }

    let response = client
        .get(format!("{api_url}/recommendations"))
        .bearer_auth(token)
        .query(&query)
        .send()
        .await?;
    let json = check_status(response)
        .await?
        .json::<RecommendationsResponse>()
        .await?;

    Ok(json
        .tracks
        .into_iter()
        .filter_map(Track::into_record)
        .collect())
}
