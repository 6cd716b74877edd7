mod archive;
mod dedup;

use std::num::NonZeroUsize;

use crate::{
    Error, Res,
    config::{Credentials, Schedule},
    provider::{MAX_ITEMS_PER_REQUEST, PlaylistProvider},
    utils,
};

pub use archive::{ArchiveOutcome, archive, archive_playlist};
pub use dedup::{dedup_playlist, deduplicate};

/// Batch size for appends and removals.
pub(crate) const BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(MAX_ITEMS_PER_REQUEST) {
    Some(size) => size,
    None => panic!("batch size must be non-zero"),
};

/// Result of one pass over a schedule group.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: Vec<String>,
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Checks that the credentials cover everything the schedule asks for,
/// before any provider call is made.
pub fn preflight(schedule: &Schedule, credentials: &Credentials) -> Res<()> {
    let needs_user = schedule
        .values()
        .any(|playlist| playlist.snapshot_name.is_some());
    if needs_user && credentials.username.is_none() {
        return Err(Error::Configuration(
            "SPOTIFY_USER_ID must be set when snapshot_name is configured".to_string(),
        ));
    }
    Ok(())
}

async fn append_in_batches<P: PlaylistProvider>(
    provider: &P,
    playlist_id: &str,
    native_ids: &[String],
) -> Res<()> {
    for batch in utils::chunk(native_ids, BATCH_SIZE) {
        provider.append_items(playlist_id, batch).await?;
    }
    Ok(())
}
