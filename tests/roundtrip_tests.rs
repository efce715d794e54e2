//! Backup-then-restore round trip against two independent stores.

use shelfarr::db::Store;
use shelfarr::models::category::CategoryInput;
use shelfarr::models::entry::{CustomEntryInfo, EntryInput};
use shelfarr::models::episode::EpisodeInput;
use shelfarr::models::history::HistoryRecord;
use shelfarr::models::track::TrackInput;
use shelfarr::services::{BackupService, DefaultBackupService};
use tokio_util::sync::CancellationToken;

async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("shelfarr-roundtrip-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create test store")
}

async fn populate(store: &Store) {
    let watching = store
        .upsert_category(&CategoryInput {
            name: "Watching".to_string(),
            sort_order: 0,
            flags: 0,
        })
        .await
        .unwrap();
    store
        .upsert_category(&CategoryInput {
            name: "Done".to_string(),
            sort_order: 1,
            flags: 0,
        })
        .await
        .unwrap();

    for n in 1..=2 {
        let id = store
            .insert_entry(&EntryInput {
                source_id: 7,
                url: format!("/series/{n}"),
                title: format!("Series {n}"),
                artist: Some("Studio".to_string()),
                author: None,
                description: Some("A show".to_string()),
                genres: Some(vec!["Action".to_string(), "Drama".to_string()]),
                status: 1,
                thumbnail_url: Some(format!("https://img.example/{n}.jpg")),
                favorite: true,
                added_at: 1_700_000_000_000,
                viewer_flags: 0,
            })
            .await
            .unwrap()
            .expect("insert should yield an id");

        store
            .upsert_episodes(
                id,
                &[EpisodeInput {
                    url: format!("/series/{n}/ep/1"),
                    name: "Episode 1".to_string(),
                    episode_number: 1.0,
                    seen: true,
                    last_second_seen: 900,
                    total_seconds: 1440,
                    source_order: 0,
                }],
            )
            .await
            .unwrap();

        store
            .upsert_history(&[HistoryRecord {
                episode_url: format!("/series/{n}/ep/1"),
                seen_at: 1_700_000_200_000,
            }])
            .await
            .unwrap();

        store
            .upsert_tracks(
                id,
                &[TrackInput {
                    tracker_id: 1,
                    remote_id: 500 + n,
                    remote_url: format!("https://tracker.example/{n}"),
                    title: format!("Series {n}"),
                    last_episode_seen: 1.0,
                    total_episodes: 12,
                    score: 7.0,
                    status: 1,
                }],
            )
            .await
            .unwrap();

        store.assign_categories(id, &[watching]).await.unwrap();
    }

    let first = store
        .find_entry_by_key(7, "/series/1")
        .await
        .unwrap()
        .unwrap();
    store
        .save_custom_info(&CustomEntryInfo {
            entry_id: first.id,
            title: Some("Renamed".to_string()),
            artist: None,
            author: None,
            description: None,
            genres: None,
        })
        .await
        .unwrap();

    store.set_setting_int("update_interval", 6).await.unwrap();
    store.set_setting_bool("incognito_mode", false).await.unwrap();
    store
        .set_setting_string("display_mode", "grid")
        .await
        .unwrap();
}

#[tokio::test]
async fn backup_restores_into_empty_store_equivalently() {
    let source = temp_store().await;
    populate(&source).await;

    let snapshot_path =
        std::env::temp_dir().join(format!("shelfarr-roundtrip-{}.gz", uuid::Uuid::new_v4()));

    let summary = DefaultBackupService::new(source.clone())
        .create(&snapshot_path)
        .await
        .unwrap();
    assert_eq!(summary.entries, 2);
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.preferences, 3);

    let target = temp_store().await;
    let report = DefaultBackupService::new(target.clone())
        .restore(
            &snapshot_path,
            &CancellationToken::new(),
            &shelfarr::backup::NullNotifier,
        )
        .await
        .unwrap();

    assert!(report.completed);
    assert_eq!(report.restored, 2);
    assert!(report.errors.is_empty());

    let source_entries = source.list_entries().await.unwrap();
    let target_entries = target.list_entries().await.unwrap();
    assert_eq!(source_entries.len(), target_entries.len());

    for original in &source_entries {
        let restored = target
            .find_entry_by_key(original.source_id, &original.url)
            .await
            .unwrap()
            .expect("restored entry should exist");

        assert_eq!(restored.title, original.title);
        assert_eq!(restored.artist, original.artist);
        assert_eq!(restored.description, original.description);
        assert_eq!(restored.genres, original.genres);
        assert_eq!(restored.status, original.status);
        assert_eq!(restored.thumbnail_url, original.thumbnail_url);
        assert_eq!(restored.favorite, original.favorite);
        assert_eq!(restored.added_at, original.added_at);

        let original_episodes = source.episodes_for_entry(original.id).await.unwrap();
        let restored_episodes = target.episodes_for_entry(restored.id).await.unwrap();
        assert_eq!(original_episodes.len(), restored_episodes.len());
        for (a, b) in original_episodes.iter().zip(&restored_episodes) {
            assert_eq!(a.url, b.url);
            assert_eq!(a.seen, b.seen);
            assert_eq!(a.last_second_seen, b.last_second_seen);
        }

        let original_tracks = source.tracks_for_entry(original.id).await.unwrap();
        let restored_tracks = target.tracks_for_entry(restored.id).await.unwrap();
        assert_eq!(original_tracks.len(), restored_tracks.len());

        assert_eq!(
            source.category_names_for_entry(original.id).await.unwrap(),
            target.category_names_for_entry(restored.id).await.unwrap()
        );
    }

    let history = target
        .history_for_urls(&["/series/1/ep/1".to_string()])
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].seen_at, 1_700_000_200_000);

    let first = target.find_entry_by_key(7, "/series/1").await.unwrap().unwrap();
    let info = target
        .custom_info_for_entry(first.id)
        .await
        .unwrap()
        .expect("custom info should round-trip");
    assert_eq!(info.title.as_deref(), Some("Renamed"));

    assert_eq!(
        source.list_settings().await.unwrap(),
        target.list_settings().await.unwrap()
    );
}
