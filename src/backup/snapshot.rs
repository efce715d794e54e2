use crate::models::entry::{CustomEntryInfo, EntryInput};
use crate::models::episode::EpisodeInput;
use crate::models::history::HistoryRecord;
use crate::models::preference::PreferenceValue;
use crate::models::track::TrackInput;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SNAPSHOT_VERSION: u32 = 2;

const fn default_version() -> u32 {
    1
}

/// Decoded backup payload. Produced once per restore and read-only after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub categories: Vec<SnapshotCategory>,
    #[serde(default)]
    pub entries: Vec<SnapshotEntry>,
    #[serde(default)]
    pub sources: Vec<SnapshotSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broken_sources: Vec<BrokenSnapshotSource>,
    #[serde(default)]
    pub preferences: Vec<SnapshotPreference>,
}

impl Snapshot {
    /// Source-id to display-name map for error messages. Legacy records go
    /// in first so a canonical record with the same id wins.
    #[must_use]
    pub fn source_names(&self) -> HashMap<i64, String> {
        self.broken_sources
            .iter()
            .map(|s| (s.source_id, s.name.clone()))
            .chain(self.sources.iter().map(|s| (s.source_id, s.name.clone())))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotCategory {
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub flags: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSource {
    pub name: String,
    pub source_id: i64,
}

/// Legacy source record with the field layout of old archives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokenSnapshotSource {
    pub source_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub source_id: i64,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub added_at: i64,
    #[serde(default)]
    pub viewer_flags: i32,
    #[serde(default)]
    pub episodes: Vec<SnapshotEpisode>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub history: Vec<SnapshotHistory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broken_history: Vec<BrokenSnapshotHistory>,
    #[serde(default)]
    pub tracks: Vec<SnapshotTrack>,
    #[serde(default)]
    pub custom_info: Option<SnapshotCustomInfo>,
}

impl SnapshotEntry {
    #[must_use]
    pub fn entry_input(&self) -> EntryInput {
        EntryInput {
            source_id: self.source_id,
            url: self.url.clone(),
            title: self.title.clone(),
            artist: self.artist.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            genres: (!self.genres.is_empty()).then(|| self.genres.clone()),
            status: self.status,
            thumbnail_url: self.thumbnail_url.clone(),
            favorite: self.favorite,
            added_at: self.added_at,
            viewer_flags: self.viewer_flags,
        }
    }

    #[must_use]
    pub fn episode_inputs(&self) -> Vec<EpisodeInput> {
        self.episodes
            .iter()
            .map(|e| EpisodeInput {
                url: e.url.clone(),
                name: e.name.clone(),
                episode_number: e.episode_number,
                seen: e.seen,
                last_second_seen: e.last_second_seen,
                total_seconds: e.total_seconds,
                source_order: e.source_order,
            })
            .collect()
    }

    /// History in apply order: legacy records first, canonical after, so a
    /// key-based upsert lets canonical data win.
    #[must_use]
    pub fn history_records(&self) -> Vec<HistoryRecord> {
        self.broken_history
            .iter()
            .map(|h| HistoryRecord {
                episode_url: h.url.clone(),
                seen_at: h.last_seen,
            })
            .chain(self.history.iter().map(|h| HistoryRecord {
                episode_url: h.url.clone(),
                seen_at: h.seen_at,
            }))
            .collect()
    }

    #[must_use]
    pub fn track_inputs(&self) -> Vec<TrackInput> {
        self.tracks
            .iter()
            .map(|t| TrackInput {
                tracker_id: t.tracker_id,
                remote_id: t.remote_id,
                remote_url: t.remote_url.clone(),
                title: t.title.clone(),
                last_episode_seen: t.last_episode_seen,
                total_episodes: t.total_episodes,
                score: t.score,
                status: t.status,
            })
            .collect()
    }

    /// Custom-info override bound to the given resolved local id. The
    /// snapshot-time id is never trusted.
    #[must_use]
    pub fn custom_info_for(&self, entry_id: i64) -> Option<CustomEntryInfo> {
        self.custom_info.as_ref().map(|c| CustomEntryInfo {
            entry_id,
            title: c.title.clone(),
            artist: c.artist.clone(),
            author: c.author.clone(),
            description: c.description.clone(),
            genres: c.genres.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEpisode {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub episode_number: f32,
    #[serde(default)]
    pub seen: bool,
    #[serde(default)]
    pub last_second_seen: i64,
    #[serde(default)]
    pub total_seconds: i64,
    #[serde(default)]
    pub source_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHistory {
    pub url: String,
    pub seen_at: i64,
}

/// Legacy history record; `last_seen` is the old field name for the
/// consumed-at timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokenSnapshotHistory {
    pub url: String,
    pub last_seen: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTrack {
    pub tracker_id: i64,
    #[serde(default)]
    pub remote_id: i64,
    #[serde(default)]
    pub remote_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub last_episode_seen: f32,
    #[serde(default)]
    pub total_episodes: i32,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub status: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotCustomInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPreference {
    pub key: String,
    pub value: PreferenceValue,
}
