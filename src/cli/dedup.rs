use std::collections::HashSet;

use crate::{
    Res, archive, config::Schedule, info, provider::PlaylistProvider, success, warning,
};

use super::{BATCH_SIZE, RunSummary};

/// Removes duplicates from the archive playlist of every schedule entry.
///
/// Archive playlists shared by several entries are processed once.
pub async fn deduplicate<P: PlaylistProvider>(
    provider: &P,
    schedule: &Schedule,
) -> Res<RunSummary> {
    let mut summary = RunSummary::default();
    let mut done: HashSet<&str> = HashSet::new();

    for (name, playlist) in schedule {
        if !done.insert(playlist.archive_playlist_id.as_str()) {
            info!("Archive playlist of {} already deduplicated", name);
            continue;
        }

        info!("Deduplicating {}", name);
        match dedup_playlist(provider, &playlist.archive_playlist_id).await {
            Ok(_) => summary.processed.push(name.clone()),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warning!("Failed to deduplicate {}: {}", name, e);
                summary.failed.push(name.clone());
            }
        }
    }

    Ok(summary)
}

/// Removes duplicate recordings from one playlist and returns how many
/// occurrences were removed.
///
/// All batches reference the single snapshot fetched at the start.
pub async fn dedup_playlist<P: PlaylistProvider>(provider: &P, playlist_id: &str) -> Res<usize> {
    let entries = archive::fetch_all_entries(provider, playlist_id).await?;
    let duplicates = archive::find_duplicates(&entries);

    if duplicates.is_empty() {
        info!("No duplicates found in {}", playlist_id);
        return Ok(0);
    }

    info!(
        "Removing {} duplicates from {}",
        duplicates.len(),
        playlist_id
    );
    for batch in archive::removal_batches(&duplicates, BATCH_SIZE) {
        provider.remove_occurrences(playlist_id, &batch).await?;
        success!("Removed {} duplicates from {}", batch.len(), playlist_id);
    }

    info!("Done removing duplicates from {}", playlist_id);
    Ok(duplicates.len())
}
