//! Default implementation of the `BackupService` trait over the SQLite store.

use crate::backup::codec;
use crate::backup::snapshot::{
    Snapshot, SnapshotCategory, SnapshotCustomInfo, SnapshotEntry, SnapshotEpisode,
    SnapshotHistory, SnapshotPreference, SnapshotSource, SnapshotTrack, SNAPSHOT_VERSION,
};
use crate::backup::RestoreNotifier;
use crate::db::Store;
use crate::models::category::CategoryInput;
use crate::models::preference::PreferenceValue;
use crate::services::backup_service::{
    BackupError, BackupService, BackupSummary, RestoreIssue, RestoreReport,
};
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Per-run restore state, threaded through each step instead of living as
/// ambient fields on the service.
struct RestoreSession {
    progress: u32,
    total: u32,
    source_names: HashMap<i64, String>,
    category_ids: HashMap<String, i64>,
    errors: Vec<RestoreIssue>,
    restored: usize,
}

impl RestoreSession {
    fn new(snapshot: &Snapshot) -> Self {
        Self {
            progress: 0,
            // One reserved unit for the categories step, one for settings.
            total: u32::try_from(snapshot.entries.len()).unwrap_or(u32::MAX - 2) + 2,
            source_names: snapshot.source_names(),
            category_ids: HashMap::new(),
            errors: Vec::new(),
            restored: 0,
        }
    }

    fn source_label(&self, source_id: i64) -> String {
        self.source_names
            .get(&source_id)
            .cloned()
            .unwrap_or_else(|| source_id.to_string())
    }
}

pub struct DefaultBackupService {
    store: Store,
}

impl DefaultBackupService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn restore_categories(
        &self,
        categories: &[SnapshotCategory],
        session: &mut RestoreSession,
        notifier: &dyn RestoreNotifier,
    ) -> Result<(), BackupError> {
        for category in categories {
            let id = self
                .store
                .upsert_category(&CategoryInput {
                    name: category.name.clone(),
                    sort_order: category.sort_order,
                    flags: category.flags,
                })
                .await?;
            session.category_ids.insert(category.name.clone(), id);
        }

        session.progress += 1;
        notifier.progress(session.progress, session.total, "Categories");
        Ok(())
    }

    /// Reconciles one snapshot entry against the store.
    ///
    /// Returns `Ok(false)` for the silent no-op case where inserting a fresh
    /// entry yields no local id. Everything else either restores the entry
    /// and its children or surfaces an error for the caller to record.
    async fn restore_entry(
        &self,
        entry: &SnapshotEntry,
        session: &RestoreSession,
    ) -> anyhow::Result<bool> {
        if entry.url.trim().is_empty() {
            anyhow::bail!("record has no remote url");
        }
        if entry.title.trim().is_empty() {
            anyhow::bail!("record has no title");
        }

        let input = entry.entry_input();

        let entry_id = match self
            .store
            .find_entry_by_key(input.source_id, &input.url)
            .await?
        {
            Some(existing) => {
                self.store.merge_entry_fields(existing.id, &input).await?;
                existing.id
            }
            None => {
                let Some(id) = self.store.insert_entry(&input).await? else {
                    return Ok(false);
                };
                id
            }
        };

        self.store
            .upsert_episodes(entry_id, &entry.episode_inputs())
            .await?;

        // Unknown category names have no id mapping and are skipped.
        let category_ids: Vec<i64> = entry
            .categories
            .iter()
            .filter_map(|name| session.category_ids.get(name).copied())
            .collect();
        self.store.assign_categories(entry_id, &category_ids).await?;

        self.store.upsert_history(&entry.history_records()).await?;

        self.store
            .upsert_tracks(entry_id, &entry.track_inputs())
            .await?;

        if let Some(info) = entry.custom_info_for(entry_id) {
            self.store.save_custom_info(&info).await?;
        }

        Ok(true)
    }

    async fn apply_preferences(
        &self,
        preferences: &[SnapshotPreference],
    ) -> Result<(), BackupError> {
        for pref in preferences {
            match &pref.value {
                PreferenceValue::Int(v) => self.store.set_setting_int(&pref.key, *v).await?,
                PreferenceValue::Long(v) => self.store.set_setting_long(&pref.key, *v).await?,
                PreferenceValue::Float(v) => self.store.set_setting_float(&pref.key, *v).await?,
                PreferenceValue::String(v) => self.store.set_setting_string(&pref.key, v).await?,
                PreferenceValue::Bool(v) => self.store.set_setting_bool(&pref.key, *v).await?,
                PreferenceValue::StringSet(v) => {
                    self.store.set_setting_string_set(&pref.key, v).await?;
                }
            }
        }
        Ok(())
    }

    async fn dump_entry(&self, entry: crate::models::entry::Entry) -> anyhow::Result<SnapshotEntry> {
        let episodes = self.store.episodes_for_entry(entry.id).await?;
        let episode_urls: Vec<String> = episodes.iter().map(|e| e.url.clone()).collect();
        let history = self.store.history_for_urls(&episode_urls).await?;
        let tracks = self.store.tracks_for_entry(entry.id).await?;
        let categories = self.store.category_names_for_entry(entry.id).await?;
        let custom_info = self.store.custom_info_for_entry(entry.id).await?;

        Ok(SnapshotEntry {
            source_id: entry.source_id,
            url: entry.url,
            title: entry.title,
            artist: entry.artist,
            author: entry.author,
            description: entry.description,
            genres: entry.genres.unwrap_or_default(),
            status: entry.status,
            thumbnail_url: entry.thumbnail_url,
            favorite: entry.favorite,
            added_at: entry.added_at,
            viewer_flags: entry.viewer_flags,
            episodes: episodes
                .into_iter()
                .map(|e| SnapshotEpisode {
                    url: e.url,
                    name: e.name,
                    episode_number: e.episode_number,
                    seen: e.seen,
                    last_second_seen: e.last_second_seen,
                    total_seconds: e.total_seconds,
                    source_order: e.source_order,
                })
                .collect(),
            categories,
            history: history
                .into_iter()
                .map(|h| SnapshotHistory {
                    url: h.episode_url,
                    seen_at: h.seen_at,
                })
                .collect(),
            broken_history: Vec::new(),
            tracks: tracks
                .into_iter()
                .map(|t| SnapshotTrack {
                    tracker_id: t.tracker_id,
                    remote_id: t.remote_id,
                    remote_url: t.remote_url,
                    title: t.title,
                    last_episode_seen: t.last_episode_seen,
                    total_episodes: t.total_episodes,
                    score: t.score,
                    status: t.status,
                })
                .collect(),
            custom_info: custom_info.map(|c| SnapshotCustomInfo {
                title: c.title,
                artist: c.artist,
                author: c.author,
                description: c.description,
                genres: c.genres,
            }),
        })
    }
}

#[async_trait::async_trait]
impl BackupService for DefaultBackupService {
    async fn restore(
        &self,
        path: &Path,
        token: &CancellationToken,
        notifier: &dyn RestoreNotifier,
    ) -> Result<RestoreReport, BackupError> {
        let snapshot = codec::read_from_file(path).await?;
        let total_entries = snapshot.entries.len();
        let mut session = RestoreSession::new(&snapshot);

        info!(
            "Restoring snapshot v{}: {} entries, {} categories, {} preferences",
            snapshot.version,
            total_entries,
            snapshot.categories.len(),
            snapshot.preferences.len()
        );

        if !snapshot.categories.is_empty() {
            self.restore_categories(&snapshot.categories, &mut session, notifier)
                .await?;
        }

        for entry in &snapshot.entries {
            // Cooperative cancellation: an entry already in flight finishes,
            // remaining entries and the settings step are skipped.
            if token.is_cancelled() {
                info!(
                    "Restore cancelled after {} of {} entries",
                    session.restored, total_entries
                );
                return Ok(RestoreReport {
                    completed: false,
                    total_entries,
                    restored: session.restored,
                    errors: session.errors,
                });
            }

            match self.restore_entry(entry, &session).await {
                Ok(true) => session.restored += 1,
                Ok(false) => debug!("No local id for '{}', nothing to restore", entry.title),
                Err(err) => {
                    let source = session.source_label(entry.source_id);
                    session.errors.push(RestoreIssue {
                        at: Utc::now(),
                        message: format!("{} [{source}]: {err}", entry.title),
                    });
                }
            }

            session.progress += 1;
            notifier.progress(session.progress, session.total, &entry.title);
        }

        self.apply_preferences(&snapshot.preferences).await?;
        session.progress += 1;
        notifier.progress(session.progress, session.total, "Settings");

        info!(
            "Restore finished: {} restored, {} errors",
            session.restored,
            session.errors.len()
        );

        Ok(RestoreReport {
            completed: true,
            total_entries,
            restored: session.restored,
            errors: session.errors,
        })
    }

    async fn create(&self, path: &Path) -> Result<BackupSummary, BackupError> {
        let categories = self.store.list_categories().await?;
        let entries = self.store.list_entries().await?;
        let settings = self.store.list_settings().await?;

        let mut snapshot_entries = Vec::with_capacity(entries.len());
        let mut source_ids: Vec<i64> = Vec::new();
        for entry in entries {
            if !source_ids.contains(&entry.source_id) {
                source_ids.push(entry.source_id);
            }
            snapshot_entries.push(self.dump_entry(entry).await?);
        }

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            categories: categories
                .into_iter()
                .map(|c| SnapshotCategory {
                    name: c.name,
                    sort_order: c.sort_order,
                    flags: c.flags,
                })
                .collect(),
            entries: snapshot_entries,
            // No local source registry; ids double as display names.
            sources: source_ids
                .into_iter()
                .map(|id| SnapshotSource {
                    name: id.to_string(),
                    source_id: id,
                })
                .collect(),
            broken_sources: Vec::new(),
            preferences: settings
                .into_iter()
                .map(|(key, value)| SnapshotPreference { key, value })
                .collect(),
        };

        codec::write_to_file(path, &snapshot).await?;

        info!(
            "Snapshot written to {} ({} entries)",
            path.display(),
            snapshot.entries.len()
        );

        Ok(BackupSummary {
            path: path.to_path_buf(),
            entries: snapshot.entries.len(),
            categories: snapshot.categories.len(),
            preferences: snapshot.preferences.len(),
        })
    }
}
