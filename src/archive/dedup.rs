use std::{collections::HashMap, num::NonZeroUsize};

use crate::{
    types::{RemovalInstruction, TrackEntry},
    utils,
};

/// Plans the removal of duplicate recordings from one playlist snapshot.
///
/// Entries are grouped by external id in first-seen order; entries without
/// one are never duplicates. Within a group the earliest `added_at` survives,
/// ties going to the entry fetched first. Every other entry yields one
/// instruction for its own position, in group order and then fetch order.
pub fn find_duplicates(entries: &[TrackEntry]) -> Vec<RemovalInstruction> {
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&TrackEntry>> = Vec::new();

    for entry in entries {
        let Some(external_id) = entry.external_id.as_deref() else {
            continue;
        };
        match group_index.get(external_id) {
            Some(&index) => groups[index].push(entry),
            None => {
                group_index.insert(external_id, groups.len());
                groups.push(vec![entry]);
            }
        }
    }

    groups
        .into_iter()
        .filter(|group| group.len() > 1)
        .flat_map(|group| {
            // min_by_key returns the first of equal minima
            let survivor = group
                .iter()
                .enumerate()
                .min_by_key(|(_, entry)| entry.added_at)
                .map(|(index, _)| index);
            group
                .into_iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != survivor)
                .map(|(_, entry)| RemovalInstruction::single(entry.native_id.clone(), entry.position))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Orders removal instructions for execution against a single snapshot and
/// splits them into batches of at most `size`.
///
/// Batches run from the end of the playlist towards its start, so removing
/// one batch never shifts the positions referenced by a later batch.
pub fn removal_batches(
    removals: &[RemovalInstruction],
    size: NonZeroUsize,
) -> Vec<Vec<RemovalInstruction>> {
    let mut ordered = removals.to_vec();
    ordered.sort_by(|a, b| b.last_position().cmp(&a.last_position()));
    utils::chunk(&ordered, size).map(<[_]>::to_vec).collect()
}
