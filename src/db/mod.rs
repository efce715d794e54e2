use crate::models::category::{Category, CategoryInput};
use crate::models::entry::{CustomEntryInfo, Entry, EntryInput};
use crate::models::episode::{Episode, EpisodeInput};
use crate::models::history::HistoryRecord;
use crate::models::preference::PreferenceValue;
use crate::models::track::{Track, TrackInput};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn entry_repo(&self) -> repositories::entry::EntryRepository {
        repositories::entry::EntryRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn track_repo(&self) -> repositories::track::TrackRepository {
        repositories::track::TrackRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn custom_info_repo(&self) -> repositories::custom_info::CustomInfoRepository {
        repositories::custom_info::CustomInfoRepository::new(self.conn.clone())
    }

    fn settings_repo(&self) -> repositories::settings::SettingsRepository {
        repositories::settings::SettingsRepository::new(self.conn.clone())
    }

    // ========== Entries ==========

    pub async fn find_entry_by_key(&self, source_id: i64, url: &str) -> Result<Option<Entry>> {
        self.entry_repo().find_by_key(source_id, url).await
    }

    pub async fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        self.entry_repo().get(id).await
    }

    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        self.entry_repo().list_all().await
    }

    pub async fn insert_entry(&self, input: &EntryInput) -> Result<Option<i64>> {
        self.entry_repo().insert(input).await
    }

    pub async fn merge_entry_fields(&self, id: i64, input: &EntryInput) -> Result<()> {
        self.entry_repo().merge_fields(id, input).await
    }

    // ========== Episodes ==========

    pub async fn episodes_for_entry(&self, entry_id: i64) -> Result<Vec<Episode>> {
        self.episode_repo().get_for_entry(entry_id).await
    }

    pub async fn upsert_episodes(&self, entry_id: i64, episodes: &[EpisodeInput]) -> Result<()> {
        self.episode_repo().upsert_many(entry_id, episodes).await
    }

    // ========== History ==========

    pub async fn upsert_history(&self, records: &[HistoryRecord]) -> Result<()> {
        self.history_repo().upsert_many(records).await
    }

    pub async fn history_for_urls(&self, urls: &[String]) -> Result<Vec<HistoryRecord>> {
        self.history_repo().get_for_urls(urls).await
    }

    // ========== Tracks ==========

    pub async fn tracks_for_entry(&self, entry_id: i64) -> Result<Vec<Track>> {
        self.track_repo().get_for_entry(entry_id).await
    }

    pub async fn upsert_tracks(&self, entry_id: i64, tracks: &[TrackInput]) -> Result<()> {
        self.track_repo().upsert_many(entry_id, tracks).await
    }

    // ========== Categories ==========

    pub async fn upsert_category(&self, input: &CategoryInput) -> Result<i64> {
        self.category_repo().upsert(input).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.category_repo().list_all().await
    }

    pub async fn assign_categories(&self, entry_id: i64, category_ids: &[i64]) -> Result<()> {
        self.category_repo()
            .assign_to_entry(entry_id, category_ids)
            .await
    }

    pub async fn category_names_for_entry(&self, entry_id: i64) -> Result<Vec<String>> {
        self.category_repo().names_for_entry(entry_id).await
    }

    // ========== Custom info ==========

    pub async fn save_custom_info(&self, info: &CustomEntryInfo) -> Result<()> {
        self.custom_info_repo().save(info).await
    }

    pub async fn custom_info_for_entry(&self, entry_id: i64) -> Result<Option<CustomEntryInfo>> {
        self.custom_info_repo().get(entry_id).await
    }

    // ========== Settings ==========

    pub async fn set_setting_int(&self, key: &str, value: i32) -> Result<()> {
        self.settings_repo().set_int(key, value).await
    }

    pub async fn set_setting_long(&self, key: &str, value: i64) -> Result<()> {
        self.settings_repo().set_long(key, value).await
    }

    pub async fn set_setting_float(&self, key: &str, value: f32) -> Result<()> {
        self.settings_repo().set_float(key, value).await
    }

    pub async fn set_setting_string(&self, key: &str, value: &str) -> Result<()> {
        self.settings_repo().set_string(key, value).await
    }

    pub async fn set_setting_bool(&self, key: &str, value: bool) -> Result<()> {
        self.settings_repo().set_bool(key, value).await
    }

    pub async fn set_setting_string_set(&self, key: &str, value: &[String]) -> Result<()> {
        self.settings_repo().set_string_set(key, value).await
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<PreferenceValue>> {
        self.settings_repo().get(key).await
    }

    pub async fn list_settings(&self) -> Result<Vec<(String, PreferenceValue)>> {
        self.settings_repo().list_all().await
    }
}
