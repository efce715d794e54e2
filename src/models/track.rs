use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub entry_id: i64,
    pub tracker_id: i64,
    pub remote_id: i64,
    pub remote_url: String,
    pub title: String,
    pub last_episode_seen: f32,
    pub total_episodes: i32,
    pub score: f32,
    pub status: i32,
}

/// Tracker link data to persist for an entry, keyed by `(entry_id, tracker_id)`.
#[derive(Debug, Clone, Default)]
pub struct TrackInput {
    pub tracker_id: i64,
    pub remote_id: i64,
    pub remote_url: String,
    pub title: String,
    pub last_episode_seen: f32,
    pub total_episodes: i32,
    pub score: f32,
    pub status: i32,
}
