//! Restore reconciliation tests against a real SQLite store.

use shelfarr::backup::codec;
use shelfarr::backup::snapshot::{
    BrokenSnapshotHistory, Snapshot, SnapshotCategory, SnapshotCustomInfo, SnapshotEntry,
    SnapshotEpisode, SnapshotHistory, SnapshotPreference, SnapshotSource, SnapshotTrack,
    SNAPSHOT_VERSION,
};
use shelfarr::backup::RestoreNotifier;
use shelfarr::db::Store;
use shelfarr::models::preference::PreferenceValue;
use shelfarr::services::{BackupService, DefaultBackupService};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

const SOURCE_ID: i64 = 7;

async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("shelfarr-restore-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create test store")
}

async fn write_snapshot(snapshot: &Snapshot) -> PathBuf {
    let path =
        std::env::temp_dir().join(format!("shelfarr-snapshot-{}.gz", uuid::Uuid::new_v4()));
    codec::write_to_file(&path, snapshot)
        .await
        .expect("failed to write snapshot");
    path
}

fn test_entry(n: usize) -> SnapshotEntry {
    SnapshotEntry {
        source_id: SOURCE_ID,
        url: format!("/series/{n}"),
        title: format!("Series {n}"),
        artist: Some("Studio".to_string()),
        author: None,
        description: Some("A show".to_string()),
        genres: vec!["Action".to_string()],
        status: 1,
        thumbnail_url: None,
        favorite: true,
        added_at: 1_700_000_000_000,
        viewer_flags: 0,
        episodes: vec![
            SnapshotEpisode {
                url: format!("/series/{n}/ep/1"),
                name: "Episode 1".to_string(),
                episode_number: 1.0,
                seen: true,
                last_second_seen: 1200,
                total_seconds: 1440,
                source_order: 0,
            },
            SnapshotEpisode {
                url: format!("/series/{n}/ep/2"),
                name: "Episode 2".to_string(),
                episode_number: 2.0,
                seen: false,
                last_second_seen: 0,
                total_seconds: 1440,
                source_order: 1,
            },
        ],
        categories: vec!["Watching".to_string()],
        history: vec![SnapshotHistory {
            url: format!("/series/{n}/ep/1"),
            seen_at: 1_700_000_100_000,
        }],
        broken_history: vec![],
        tracks: vec![SnapshotTrack {
            tracker_id: 1,
            remote_id: 1000 + n as i64,
            remote_url: format!("https://tracker.example/{n}"),
            title: format!("Series {n}"),
            last_episode_seen: 1.0,
            total_episodes: 12,
            score: 8.5,
            status: 1,
        }],
        custom_info: None,
    }
}

fn test_snapshot(entries: Vec<SnapshotEntry>) -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION,
        categories: vec![SnapshotCategory {
            name: "Watching".to_string(),
            sort_order: 0,
            flags: 0,
        }],
        entries,
        sources: vec![SnapshotSource {
            name: "TestSource".to_string(),
            source_id: SOURCE_ID,
        }],
        broken_sources: vec![],
        preferences: vec![
            SnapshotPreference {
                key: "library_update_interval".to_string(),
                value: PreferenceValue::Int(12),
            },
            SnapshotPreference {
                key: "incognito_mode".to_string(),
                value: PreferenceValue::Bool(true),
            },
            SnapshotPreference {
                key: "enabled_languages".to_string(),
                value: PreferenceValue::StringSet(vec!["en".to_string(), "ja".to_string()]),
            },
        ],
    }
}

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<(u32, u32, String)>>,
}

impl RestoreNotifier for RecordingNotifier {
    fn progress(&self, current: u32, total: u32, label: &str) {
        self.events
            .lock()
            .unwrap()
            .push((current, total, label.to_string()));
    }
}

/// Cancels the token once an entry with the given label has finished.
struct CancelAfterNotifier {
    token: CancellationToken,
    after_label: String,
}

impl RestoreNotifier for CancelAfterNotifier {
    fn progress(&self, _current: u32, _total: u32, label: &str) {
        if label == self.after_label {
            self.token.cancel();
        }
    }
}

#[tokio::test]
async fn restore_inserts_fresh_entries_with_children() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());
    let path = write_snapshot(&test_snapshot(vec![
        test_entry(1),
        test_entry(2),
        test_entry(3),
    ]))
    .await;

    let notifier = RecordingNotifier::default();
    let report = service
        .restore(&path, &CancellationToken::new(), &notifier)
        .await
        .unwrap();

    assert!(report.completed);
    assert_eq!(report.restored, 3);
    assert!(report.errors.is_empty());

    for n in 1..=3 {
        let entry = store
            .find_entry_by_key(SOURCE_ID, &format!("/series/{n}"))
            .await
            .unwrap()
            .expect("entry should exist");
        assert_eq!(entry.title, format!("Series {n}"));

        let episodes = store.episodes_for_entry(entry.id).await.unwrap();
        assert_eq!(episodes.len(), 2);

        let tracks = store.tracks_for_entry(entry.id).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].score, 8.5);

        let categories = store.category_names_for_entry(entry.id).await.unwrap();
        assert_eq!(categories, vec!["Watching".to_string()]);

        let history = store
            .history_for_urls(&[format!("/series/{n}/ep/1")])
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].seen_at, 1_700_000_100_000);
    }
}

#[tokio::test]
async fn restore_progress_reaches_entry_count_plus_two() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store);
    let path = write_snapshot(&test_snapshot(vec![
        test_entry(1),
        test_entry(2),
        test_entry(3),
    ]))
    .await;

    let notifier = RecordingNotifier::default();
    service
        .restore(&path, &CancellationToken::new(), &notifier)
        .await
        .unwrap();

    let events = notifier.events.lock().unwrap();
    assert!(events.iter().all(|(current, total, _)| current <= total));
    assert_eq!(events.first().unwrap().2, "Categories");
    assert_eq!(events.last().unwrap().2, "Settings");
    // 3 entries + categories step + settings step.
    assert_eq!(events.last().unwrap().0, 5);
    assert_eq!(events.last().unwrap().1, 5);
}

#[tokio::test]
async fn restore_applies_typed_preferences() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());
    let path = write_snapshot(&test_snapshot(vec![test_entry(1)])).await;

    service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    assert_eq!(
        store.get_setting("library_update_interval").await.unwrap(),
        Some(PreferenceValue::Int(12))
    );
    assert_eq!(
        store.get_setting("incognito_mode").await.unwrap(),
        Some(PreferenceValue::Bool(true))
    );
    assert_eq!(
        store.get_setting("enabled_languages").await.unwrap(),
        Some(PreferenceValue::StringSet(vec![
            "en".to_string(),
            "ja".to_string()
        ]))
    );
}

#[tokio::test]
async fn restore_merges_existing_entry_without_changing_identity() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let path = write_snapshot(&test_snapshot(vec![test_entry(1)])).await;
    service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    let before = store
        .find_entry_by_key(SOURCE_ID, "/series/1")
        .await
        .unwrap()
        .unwrap();
    assert!(before.favorite);

    // Same natural key, updated display fields, favorite flipped off in the
    // incoming record.
    let mut updated = test_entry(1);
    updated.title = "Series 1 (Remastered)".to_string();
    updated.description = Some("Updated description".to_string());
    updated.favorite = false;
    updated.added_at = 1;

    let path = write_snapshot(&test_snapshot(vec![updated])).await;
    let report = service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();
    assert!(report.completed);

    let after = store
        .find_entry_by_key(SOURCE_ID, "/series/1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.title, "Series 1 (Remastered)");
    assert_eq!(after.description.as_deref(), Some("Updated description"));
    // Merge copies display fields only; favorite and added_at are preserved.
    assert!(after.favorite);
    assert_eq!(after.added_at, before.added_at);

    let entries = store.list_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn restore_isolates_per_entry_failures() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let mut bad = test_entry(2);
    bad.url = String::new();

    let path =
        write_snapshot(&test_snapshot(vec![test_entry(1), bad, test_entry(3)])).await;
    let report = service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    assert!(report.completed);
    assert_eq!(report.restored, 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("Series 2"));
    assert!(report.errors[0].message.contains("[TestSource]"));

    assert!(store
        .find_entry_by_key(SOURCE_ID, "/series/1")
        .await
        .unwrap()
        .is_some());
    assert!(store
        .find_entry_by_key(SOURCE_ID, "/series/3")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn restore_error_uses_raw_source_id_when_unmapped() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store);

    let mut bad = test_entry(1);
    bad.url = String::new();
    bad.source_id = 999;

    let path = write_snapshot(&test_snapshot(vec![bad])).await;
    let report = service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("[999]"));
}

#[tokio::test]
async fn cancelled_token_skips_all_entries_and_preferences() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());
    let path = write_snapshot(&test_snapshot(vec![test_entry(1), test_entry(2)])).await;

    let token = CancellationToken::new();
    token.cancel();

    let report = service
        .restore(&path, &token, &shelfarr::backup::NullNotifier)
        .await
        .unwrap();

    assert!(!report.completed);
    assert_eq!(report.restored, 0);
    assert!(store.list_entries().await.unwrap().is_empty());
    assert_eq!(
        store.get_setting("library_update_interval").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn cancellation_mid_run_finishes_current_entry_only() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());
    let path = write_snapshot(&test_snapshot(vec![
        test_entry(1),
        test_entry(2),
        test_entry(3),
    ]))
    .await;

    let token = CancellationToken::new();
    let notifier = CancelAfterNotifier {
        token: token.clone(),
        after_label: "Series 1".to_string(),
    };

    let report = service.restore(&path, &token, &notifier).await.unwrap();

    assert!(!report.completed);
    assert_eq!(report.restored, 1);
    assert_eq!(store.list_entries().await.unwrap().len(), 1);
    // Cancellation skips the settings step entirely.
    assert_eq!(
        store.get_setting("library_update_interval").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn legacy_history_loses_to_canonical_record() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let mut entry = test_entry(1);
    entry.broken_history = vec![BrokenSnapshotHistory {
        url: "/series/1/ep/1".to_string(),
        last_seen: 1,
    }];
    entry.history = vec![SnapshotHistory {
        url: "/series/1/ep/1".to_string(),
        seen_at: 1_700_000_100_000,
    }];

    let path = write_snapshot(&test_snapshot(vec![entry])).await;
    service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    let history = store
        .history_for_urls(&["/series/1/ep/1".to_string()])
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].seen_at, 1_700_000_100_000);
}

#[tokio::test]
async fn legacy_history_alone_is_still_restored() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let mut entry = test_entry(1);
    entry.history = vec![];
    entry.broken_history = vec![BrokenSnapshotHistory {
        url: "/series/1/ep/2".to_string(),
        last_seen: 42,
    }];

    let path = write_snapshot(&test_snapshot(vec![entry])).await;
    service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    let history = store
        .history_for_urls(&["/series/1/ep/2".to_string()])
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].seen_at, 42);
}

#[tokio::test]
async fn custom_info_is_saved_under_resolved_id() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let mut entry = test_entry(1);
    entry.custom_info = Some(SnapshotCustomInfo {
        title: Some("My Custom Title".to_string()),
        artist: None,
        author: None,
        description: None,
        genres: None,
    });

    let path = write_snapshot(&test_snapshot(vec![entry])).await;
    service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    let restored = store
        .find_entry_by_key(SOURCE_ID, "/series/1")
        .await
        .unwrap()
        .unwrap();
    let info = store
        .custom_info_for_entry(restored.id)
        .await
        .unwrap()
        .expect("custom info should exist");

    assert_eq!(info.entry_id, restored.id);
    assert_eq!(info.title.as_deref(), Some("My Custom Title"));
}

#[tokio::test]
async fn unknown_category_names_are_skipped() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let mut entry = test_entry(1);
    entry.categories = vec!["Watching".to_string(), "Nonexistent".to_string()];

    let path = write_snapshot(&test_snapshot(vec![entry])).await;
    let report = service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();
    assert!(report.errors.is_empty());

    let restored = store
        .find_entry_by_key(SOURCE_ID, "/series/1")
        .await
        .unwrap()
        .unwrap();
    let categories = store.category_names_for_entry(restored.id).await.unwrap();
    assert_eq!(categories, vec!["Watching".to_string()]);
}

#[tokio::test]
async fn malformed_snapshot_fails_whole_restore() {
    let store = temp_store().await;
    let service = DefaultBackupService::new(store.clone());

    let path =
        std::env::temp_dir().join(format!("shelfarr-bad-{}.gz", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, b"not a snapshot").await.unwrap();

    let result = service
        .restore(
            &path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await;

    assert!(result.is_err());
    assert!(store.list_entries().await.unwrap().is_empty());
}
