use serde::{Deserialize, Serialize};

/// A library entry as stored, with its database-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub source_id: i64,
    pub url: String,
    pub title: String,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
    pub status: i32,
    pub thumbnail_url: Option<String>,
    pub favorite: bool,
    pub added_at: i64,
    pub viewer_flags: i32,
}

/// Incoming entry data before a local id has been resolved.
///
/// `(source_id, url)` is the natural key used to match against the store.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub source_id: i64,
    pub url: String,
    pub title: String,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
    pub status: i32,
    pub thumbnail_url: Option<String>,
    pub favorite: bool,
    pub added_at: i64,
    pub viewer_flags: i32,
}

/// User-set metadata overrides attached to an entry.
#[derive(Debug, Clone, Default)]
pub struct CustomEntryInfo {
    pub entry_id: i64,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
}
