use std::collections::HashSet;

use crate::types::{TrackEntry, TrackIdentity};

/// Both id sets of a playlist snapshot, used for duplicate detection.
#[derive(Debug, Default)]
pub struct KnownTracks {
    external_ids: HashSet<String>,
    native_ids: HashSet<String>,
}

impl KnownTracks {
    pub fn from_entries(entries: &[TrackEntry]) -> Self {
        let mut known = Self::default();
        for entry in entries {
            if let Some(external_id) = &entry.external_id {
                known.external_ids.insert(external_id.clone());
            }
            known.native_ids.insert(entry.native_id.clone());
        }
        known
    }

    /// A track is known if its external id or, failing that, its native id
    /// was seen. A missing external id never matches.
    pub fn contains(&self, track: &impl TrackIdentity) -> bool {
        track
            .external_id()
            .is_some_and(|id| self.external_ids.contains(id))
            || self.native_ids.contains(track.native_id())
    }
}

/// Returns the native ids of the candidates not yet present in `existing`,
/// in candidate order. An empty result means there is nothing to append.
pub fn compute_additions<'a, T>(
    existing: &[TrackEntry],
    candidates: impl IntoIterator<Item = &'a T>,
) -> Vec<String>
where
    T: TrackIdentity + 'a,
{
    let known = KnownTracks::from_entries(existing);
    candidates
        .into_iter()
        .filter(|candidate| !known.contains(*candidate))
        .map(|candidate| candidate.native_id().to_string())
        .collect()
}
