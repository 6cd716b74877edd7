use std::{num::NonZeroUsize, slice::Chunks};

use chrono::{Local, NaiveDate};

/// Splits `items` into consecutive groups of at most `size` elements.
///
/// The last group may be shorter; an empty slice yields no groups at all.
pub fn chunk<T>(items: &[T], size: NonZeroUsize) -> Chunks<'_, T> {
    items.chunks(size.get())
}

pub fn log_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Description written to an archive playlist after tracks were appended.
pub fn playlist_description(n_tracks: usize, date: NaiveDate) -> String {
    format!(
        "This playlist is continuously updated by sparchive. Recently added: {n_tracks} track{plural} ({date}).",
        plural = if n_tracks == 1 { "" } else { "s" },
        date = date.format("%d.%m.%Y"),
    )
}

/// Fills the `{date}` placeholder of a snapshot playlist name.
pub fn snapshot_playlist_name(template: &str, date: NaiveDate) -> String {
    template.replace("{date}", &date.format("%Y-%m-%d").to_string())
}
