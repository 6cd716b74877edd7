use chrono::NaiveDate;

use crate::{
    Res,
    archive::{self, RecommendationPlan},
    config::{PlaylistConfig, Schedule},
    info,
    provider::PlaylistProvider,
    success,
    types::TrackEntry,
    utils, warning,
};

use super::{RunSummary, append_in_batches};

/// What one archive pass changed on the remote side.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub archived: usize,
    pub recommended: usize,
    /// Id of a snapshot playlist created during this pass.
    pub snapshot_playlist: Option<String>,
}

/// Archives every playlist of a schedule group.
///
/// A failing playlist is logged and skipped; configuration errors stop the
/// run immediately.
pub async fn archive<P: PlaylistProvider>(
    provider: &P,
    schedule_name: &str,
    schedule: &Schedule,
    today: NaiveDate,
) -> Res<RunSummary> {
    info!("Archiving {} playlists", schedule_name);
    let mut summary = RunSummary::default();

    for (name, playlist) in schedule {
        match archive_playlist(provider, name, playlist, today).await {
            Ok(_) => summary.processed.push(name.clone()),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warning!("Failed to archive {}: {}", name, e);
                summary.failed.push(name.clone());
            }
        }
    }

    info!("Done archiving");
    Ok(summary)
}

/// Runs fetch, merge, append and description update for one playlist pair,
/// strictly in that order.
pub async fn archive_playlist<P: PlaylistProvider>(
    provider: &P,
    name: &str,
    playlist: &PlaylistConfig,
    today: NaiveDate,
) -> Res<ArchiveOutcome> {
    let plan = RecommendationPlan::new(playlist.recommendation_count, playlist.seed_genres.clone())
        .with_max_tries(playlist.max_tries);
    plan.validate()?;

    let archive_id = playlist.archive_playlist_id.as_str();
    let mut outcome = ArchiveOutcome::default();

    let source = archive::fetch_all_entries(provider, &playlist.source_playlist_id).await?;
    info!("Found {} with {} tracks", name, source.len());

    let mut target = archive::fetch_all_entries(provider, archive_id).await?;
    info!("Found all time playlist with {} tracks", target.len());

    let additions = archive::compute_additions(&target, &source);
    if additions.is_empty() {
        info!("All tracks are already included.");
    } else {
        append_in_batches(provider, archive_id, &additions).await?;
        success!("Archived {} tracks.", additions.len());
        outcome.archived = additions.len();
    }

    if plan.limit > 0 {
        info!("Adding recommendations");
        if !additions.is_empty() {
            target = archive::fetch_all_entries(provider, archive_id).await?;
        }
        let recommended = archive::fetch_and_merge_recommendations(provider, &target, &plan).await?;
        if !recommended.is_empty() {
            append_in_batches(provider, archive_id, &recommended).await?;
            success!("Added {} recommended tracks.", recommended.len());
            outcome.recommended = recommended.len();
        }
    }

    let total = outcome.archived + outcome.recommended;
    if total > 0 {
        let description = utils::playlist_description(total, today);
        info!("Changing playlist description to: {}", description);
        provider.set_description(archive_id, &description).await?;
    }

    if let Some(template) = &playlist.snapshot_name {
        outcome.snapshot_playlist = create_snapshot(provider, template, &source).await?;
    }

    Ok(outcome)
}

/// Copies the source tracks into a playlist named after the day the first
/// source track was added, unless that playlist already exists.
async fn create_snapshot<P: PlaylistProvider>(
    provider: &P,
    template: &str,
    source: &[TrackEntry],
) -> Res<Option<String>> {
    let Some(first) = source.first() else {
        info!("Source playlist is empty, no snapshot playlist created.");
        return Ok(None);
    };

    let snapshot_name = utils::snapshot_playlist_name(template, first.added_at.date_naive());

    if provider.find_playlist_by_name(&snapshot_name).await?.is_some() {
        info!(
            "Snapshot playlist {} already exists, skipping.",
            snapshot_name
        );
        return Ok(None);
    }

    info!("Creating snapshot playlist {}", snapshot_name);
    let snapshot_id = provider
        .create_playlist(&snapshot_name, "Snapshot created by sparchive.")
        .await?;
    let native_ids: Vec<String> = source.iter().map(|entry| entry.native_id.clone()).collect();
    append_in_batches(provider, &snapshot_id, &native_ids).await?;
    success!(
        "Created snapshot playlist {} with {} tracks.",
        snapshot_name,
        native_ids.len()
    );

    Ok(Some(snapshot_id))
}
