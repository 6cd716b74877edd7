use std::{collections::HashSet, num::NonZeroUsize};

use crate::{
    Error, Res, info,
    provider::PlaylistProvider,
    types::{MAX_RECOMMENDATION_LIMIT, MAX_SEEDS, RecommendationRequest, TrackEntry},
    utils,
};

use super::merge::KnownTracks;

pub const DEFAULT_MAX_TRIES: usize = 5;

/// Parameters of one recommendation sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPlan {
    /// Number of new tracks wanted.
    pub limit: usize,
    /// Genre seeds sent with every request.
    pub seed_genres: Vec<String>,
    pub max_tries: usize,
}

impl RecommendationPlan {
    pub fn new(limit: usize, seed_genres: Vec<String>) -> Self {
        Self {
            limit,
            seed_genres,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Checks the bounds that apply before any request is made.
    pub fn validate(&self) -> Res<()> {
        if self.limit > MAX_RECOMMENDATION_LIMIT {
            return Err(Error::InvalidRequest(format!(
                "limit must be less than or equal to {MAX_RECOMMENDATION_LIMIT}, got {}",
                self.limit
            )));
        }
        if self.seed_genres.len() > MAX_SEEDS {
            return Err(Error::InvalidRequest(format!(
                "total number of seeds must be less than or equal to {MAX_SEEDS}, got {} genres",
                self.seed_genres.len()
            )));
        }
        Ok(())
    }
}

/// Requests recommendations seeded from `existing` and returns up to
/// `plan.limit` native ids that are not in `existing` yet.
///
/// Track seeds are taken most-recently-added first. Every attempt uses the
/// next chunk of track seeds together with all genre seeds; results are
/// filtered against `existing` and accumulated in request order, without
/// repeating a track that an earlier attempt already produced.
pub async fn fetch_and_merge_recommendations<P: PlaylistProvider>(
    provider: &P,
    existing: &[TrackEntry],
    plan: &RecommendationPlan,
) -> Res<Vec<String>> {
    plan.validate()?;
    if plan.limit == 0 {
        return Ok(Vec::new());
    }

    let seeds: Vec<String> = existing
        .iter()
        .rev()
        .map(|entry| entry.native_id.clone())
        .collect();
    let seed_chunks: Vec<&[String]> = match NonZeroUsize::new(MAX_SEEDS - plan.seed_genres.len())
    {
        Some(size) => utils::chunk(&seeds, size).collect(),
        None => Vec::new(),
    };

    let known = KnownTracks::from_entries(existing);
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates: Vec<String> = Vec::new();

    for attempt in 0..plan.max_tries {
        let seed_tracks = seed_chunks.get(attempt).copied().unwrap_or_default();
        if attempt > 0 && seed_tracks.is_empty() && plan.seed_genres.is_empty() {
            info!("No seeds left after {} attempts.", attempt);
            break;
        }

        info!(
            "Trying to get recommendations {}/{}...",
            attempt + 1,
            plan.max_tries
        );
        let request = RecommendationRequest::new(
            seed_tracks.to_vec(),
            plan.seed_genres.clone(),
            MAX_RECOMMENDATION_LIMIT,
        )?;
        info!(
            "Seed tracks: {:?}, seed genres: {:?}",
            request.seed_tracks(),
            request.seed_genres()
        );

        let recommendations = provider.get_recommendations(&request).await?;
        info!("Got {} recommendations.", recommendations.len());

        let fresh: Vec<_> = recommendations
            .iter()
            .filter(|track| !known.contains(*track))
            .collect();
        info!("After filtering: {} candidates.", fresh.len());

        for track in fresh {
            if seen.insert(track.native_id.clone()) {
                candidates.push(track.native_id.clone());
            }
        }

        if candidates.len() >= plan.limit {
            break;
        }
    }

    if candidates.is_empty() {
        info!("Could not find any new tracks.");
        return Ok(candidates);
    }

    info!("Found {} new tracks.", candidates.len());
    candidates.truncate(plan.limit);
    Ok(candidates)
}
