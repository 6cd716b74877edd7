use sparchive::types::{Page, PlaylistItemsResponse, RecommendationsResponse, Track};

const ITEMS: &str = r#"{
  "items": [
    {
      "added_at": "2024-05-27T08:00:00Z",
      "track": { "id": "t1", "type": "track", "is_local": false, "external_ids": { "isrc": "USRC17607839" } }
    },
    {
      "added_at": "2024-05-27T08:00:00Z",
      "track": { "id": null, "type": "track", "is_local": true, "external_ids": {} }
    },
    {
      "added_at": "2024-05-27T08:00:00Z",
      "track": { "id": "e1", "type": "episode", "is_local": false }
    },
    { "added_at": null, "track": null },
    {
      "added_at": "2024-05-28T08:00:00Z",
      "track": { "id": "t2", "type": "track" }
    }
  ],
  "next": "https://api.spotify.com/v1/playlists/p/tracks?offset=100&limit=100"
}"#;

#[test]
fn test_playlist_items_map_to_slots() {
    let response: PlaylistItemsResponse = serde_json::from_str(ITEMS).unwrap();
    let page: Page = response.into();

    assert_eq!(page.items.len(), 5);
    assert_eq!(
        page.next.as_deref(),
        Some("https://api.spotify.com/v1/playlists/p/tracks?offset=100&limit=100")
    );

    let first = page.items[0].track.as_ref().unwrap();
    assert_eq!(first.native_id, "t1");
    assert_eq!(first.external_id.as_deref(), Some("USRC17607839"));

    // local file, episode and unavailable item keep their slot but carry no track
    assert!(page.items[1].track.is_none());
    assert!(page.items[2].track.is_none());
    assert!(page.items[3].track.is_none());
    assert!(page.items[3].added_at.is_none());

    let last = page.items[4].track.as_ref().unwrap();
    assert_eq!(last.native_id, "t2");
    assert_eq!(last.external_id, None);
}

#[test]
fn test_last_page_has_no_next() {
    let response: PlaylistItemsResponse =
        serde_json::from_str(r#"{ "items": [], "next": null }"#).unwrap();
    let page: Page = response.into();

    assert!(page.items.is_empty());
    assert_eq!(page.next, None);
}

#[test]
fn test_recommendation_tracks_without_id_are_dropped() {
    let response: RecommendationsResponse = serde_json::from_str(
        r#"{ "tracks": [
            { "id": "r1", "type": "track", "external_ids": { "isrc": "GBAYE0601498" } },
            { "id": null, "type": "track" }
        ] }"#,
    )
    .unwrap();

    let records: Vec<_> = response
        .tracks
        .into_iter()
        .filter_map(Track::into_record)
        .collect();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].native_id, "r1");
    assert_eq!(records[0].external_id.as_deref(), Some("GBAYE0601498"));
}
