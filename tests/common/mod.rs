#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use sparchive::{
    Error, Res,
    provider::PlaylistProvider,
    types::{Page, PlaylistSlot, RecommendationRequest, RemovalInstruction, TrackEntry, TrackRecord},
};

pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

pub fn entry(external_id: Option<&str>, native_id: &str, position: usize, added_at: &str) -> TrackEntry {
    TrackEntry {
        external_id: external_id.map(str::to_string),
        native_id: native_id.to_string(),
        position,
        added_at: ts(added_at),
    }
}

pub fn record(native_id: &str, external_id: Option<&str>) -> TrackRecord {
    TrackRecord {
        native_id: native_id.to_string(),
        external_id: external_id.map(str::to_string),
    }
}

pub fn slot(native_id: &str, external_id: Option<&str>, added_at: &str) -> PlaylistSlot {
    PlaylistSlot {
        track: Some(record(native_id, external_id)),
        added_at: Some(ts(added_at)),
    }
}

pub fn empty_slot(added_at: &str) -> PlaylistSlot {
    PlaylistSlot {
        track: None,
        added_at: Some(ts(added_at)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(String, Option<String>),
    Append(String, Vec<String>),
    Remove(String, Vec<RemovalInstruction>),
    Describe(String, String),
    Recommend(RecommendationRequest),
    Find(String),
    Create(String),
}

/// In-memory playlist service handing out canned pages.
///
/// Page tokens are slot offsets. Removals are validated against the current
/// playlist state, like the real service does.
pub struct FakeProvider {
    pub page_size: usize,
    pub added_at: DateTime<Utc>,
    playlists: Mutex<HashMap<String, Vec<PlaylistSlot>>>,
    catalog: Mutex<HashMap<String, Option<String>>>,
    recommendations: Mutex<VecDeque<Vec<TrackRecord>>>,
    named_playlists: Mutex<Vec<(String, String)>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProvider {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            added_at: ts("2024-06-01T00:00:00Z"),
            playlists: Mutex::new(HashMap::new()),
            catalog: Mutex::new(HashMap::new()),
            recommendations: Mutex::new(VecDeque::new()),
            named_playlists: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_playlist(self, id: &str, slots: Vec<PlaylistSlot>) -> Self {
        {
            let mut catalog = self.catalog.lock().unwrap();
            for track in slots.iter().filter_map(|slot| slot.track.as_ref()) {
                catalog.insert(track.native_id.clone(), track.external_id.clone());
            }
        }
        self.playlists.lock().unwrap().insert(id.to_string(), slots);
        self
    }

    pub fn with_recommendations(self, batches: Vec<Vec<TrackRecord>>) -> Self {
        {
            let mut catalog = self.catalog.lock().unwrap();
            for track in batches.iter().flatten() {
                catalog.insert(track.native_id.clone(), track.external_id.clone());
            }
        }
        self.recommendations.lock().unwrap().extend(batches);
        self
    }

    pub fn with_named_playlist(self, name: &str, id: &str) -> Self {
        self.named_playlists
            .lock()
            .unwrap()
            .push((name.to_string(), id.to_string()));
        self
    }

    pub fn failing_on(self, playlist_id: &str) -> Self {
        self.failing.lock().unwrap().insert(playlist_id.to_string());
        self
    }

    pub fn native_ids(&self, playlist_id: &str) -> Vec<String> {
        self.playlists.lock().unwrap()[playlist_id]
            .iter()
            .filter_map(|slot| slot.track.as_ref().map(|t| t.native_id.clone()))
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failing(&self, playlist_id: &str) -> Res<()> {
        if self.failing.lock().unwrap().contains(playlist_id) {
            return Err(Error::Provider(format!("{playlist_id} returned 500")));
        }
        Ok(())
    }
}

impl PlaylistProvider for FakeProvider {
    async fn fetch_page(&self, playlist_id: &str, page_token: Option<&str>) -> Res<Page> {
        self.record_call(Call::Fetch(
            playlist_id.to_string(),
            page_token.map(str::to_string),
        ));
        self.check_failing(playlist_id)?;

        let playlists = self.playlists.lock().unwrap();
        let slots = playlists
            .get(playlist_id)
            .ok_or_else(|| Error::Provider(format!("{playlist_id} returned 404")))?;

        let start: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(slots.len());
        Ok(Page {
            items: slots[start..end].to_vec(),
            next: (end < slots.len()).then(|| end.to_string()),
        })
    }

    async fn append_items(&self, playlist_id: &str, native_ids: &[String]) -> Res<()> {
        self.record_call(Call::Append(playlist_id.to_string(), native_ids.to_vec()));
        self.check_failing(playlist_id)?;
        assert!(native_ids.len() <= 100, "append batch too large");

        let catalog = self.catalog.lock().unwrap();
        let mut playlists = self.playlists.lock().unwrap();
        let slots = playlists.entry(playlist_id.to_string()).or_default();
        for id in native_ids {
            slots.push(PlaylistSlot {
                track: Some(TrackRecord {
                    native_id: id.clone(),
                    external_id: catalog.get(id).cloned().flatten(),
                }),
                added_at: Some(self.added_at),
            });
        }
        Ok(())
    }

    async fn remove_occurrences(
        &self,
        playlist_id: &str,
        removals: &[RemovalInstruction],
    ) -> Res<()> {
        self.record_call(Call::Remove(playlist_id.to_string(), removals.to_vec()));
        self.check_failing(playlist_id)?;
        assert!(removals.len() <= 100, "removal batch too large");

        let mut playlists = self.playlists.lock().unwrap();
        let slots = playlists.get_mut(playlist_id).unwrap();

        let mut positions = Vec::new();
        for removal in removals {
            for &position in removal.positions() {
                let at = slots
                    .get(position)
                    .and_then(|slot| slot.track.as_ref())
                    .map(|track| track.native_id.as_str());
                if at != Some(removal.native_id.as_str()) {
                    return Err(Error::Provider(format!(
                        "{} is not at position {}",
                        removal.native_id, position
                    )));
                }
                positions.push(position);
            }
        }

        positions.sort_unstable_by(|a, b| b.cmp(a));
        for position in positions {
            slots.remove(position);
        }
        Ok(())
    }

    async fn set_description(&self, playlist_id: &str, text: &str) -> Res<()> {
        self.record_call(Call::Describe(playlist_id.to_string(), text.to_string()));
        self.check_failing(playlist_id)
    }

    async fn get_recommendations(&self, request: &RecommendationRequest) -> Res<Vec<TrackRecord>> {
        self.record_call(Call::Recommend(request.clone()));
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn find_playlist_by_name(&self, name: &str) -> Res<Option<String>> {
        self.record_call(Call::Find(name.to_string()));
        Ok(self
            .named_playlists
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.clone()))
    }

    async fn create_playlist(&self, name: &str, _description: &str) -> Res<String> {
        self.record_call(Call::Create(name.to_string()));
        let id = format!("snapshot-{}", self.named_playlists.lock().unwrap().len());
        self.named_playlists
            .lock()
            .unwrap()
            .push((name.to_string(), id.clone()));
        self.playlists.lock().unwrap().insert(id.clone(), Vec::new());
        Ok(id)
    }
}
