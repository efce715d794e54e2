use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub entry_id: i64,
    pub url: String,
    pub name: String,
    pub episode_number: f32,
    pub seen: bool,
    pub last_second_seen: i64,
    pub total_seconds: i64,
    pub source_order: i32,
}

/// Episode data to persist for an entry, keyed by `(entry_id, url)`.
#[derive(Debug, Clone, Default)]
pub struct EpisodeInput {
    pub url: String,
    pub name: String,
    pub episode_number: f32,
    pub seen: bool,
    pub last_second_seen: i64,
    pub total_seconds: i64,
    pub source_order: i32,
}
