use crate::{Res, provider::PlaylistProvider, types::TrackEntry, warning};

/// Loads every slot of `playlist_id`, following page tokens until the
/// provider reports no further page.
///
/// Positions are the running slot index across all pages. Slots without an
/// addressable track still count, so the positions of real tracks match the
/// remote playlist. A failing page fails the whole fetch.
pub async fn fetch_all_entries<P: PlaylistProvider>(
    provider: &P,
    playlist_id: &str,
) -> Res<Vec<TrackEntry>> {
    let mut entries = Vec::new();
    let mut position = 0;
    let mut skipped = 0;
    let mut page_token: Option<String> = None;

    loop {
        let page = provider
            .fetch_page(playlist_id, page_token.as_deref())
            .await?;

        for slot in page.items {
            match slot.track {
                Some(track) => entries.push(TrackEntry {
                    external_id: track.external_id,
                    native_id: track.native_id,
                    position,
                    added_at: slot.added_at.unwrap_or_default(),
                }),
                None => skipped += 1,
            }
            position += 1;
        }

        match page.next {
            Some(next) => page_token = Some(next),
            None => break,
        }
    }

    if skipped > 0 {
        warning!(
            "Skipped {} slots without a playable track in {}",
            skipped,
            playlist_id
        );
    }

    Ok(entries)
}
