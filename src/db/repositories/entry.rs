use crate::entities::{entries, prelude::*};
use crate::models::entry::{Entry, EntryInput};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

/// Repository for library entries, matched by their natural key
/// `(source_id, url)` during restore reconciliation.
pub struct EntryRepository {
    conn: DatabaseConnection,
}

impl EntryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: entries::Model) -> Entry {
        Entry {
            id: model.id,
            source_id: model.source_id,
            url: model.url,
            title: model.title,
            artist: model.artist,
            author: model.author,
            description: model.description,
            genres: model.genres.and_then(|s| serde_json::from_str(&s).ok()),
            status: model.status,
            thumbnail_url: model.thumbnail_url,
            favorite: model.favorite,
            added_at: model.added_at,
            viewer_flags: model.viewer_flags,
        }
    }

    fn genres_json(genres: Option<&Vec<String>>) -> Option<String> {
        genres.and_then(|g| serde_json::to_string(g).ok())
    }

    pub async fn find_by_key(&self, source_id: i64, url: &str) -> Result<Option<Entry>> {
        let result = Entries::find()
            .filter(entries::Column::SourceId.eq(source_id))
            .filter(entries::Column::Url.eq(url))
            .one(&self.conn)
            .await?;

        Ok(result.map(Self::map_model))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Entry>> {
        let result = Entries::find_by_id(id).one(&self.conn).await?;
        Ok(result.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Entry>> {
        let rows = Entries::find()
            .order_by_asc(entries::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Inserts a fresh entry and returns its local id, or `None` when the
    /// backend reports no usable row id.
    pub async fn insert(&self, input: &EntryInput) -> Result<Option<i64>> {
        let active_model = entries::ActiveModel {
            source_id: Set(input.source_id),
            url: Set(input.url.clone()),
            title: Set(input.title.clone()),
            artist: Set(input.artist.clone()),
            author: Set(input.author.clone()),
            description: Set(input.description.clone()),
            genres: Set(Self::genres_json(input.genres.as_ref())),
            status: Set(input.status),
            thumbnail_url: Set(input.thumbnail_url.clone()),
            favorite: Set(input.favorite),
            added_at: Set(input.added_at),
            viewer_flags: Set(input.viewer_flags),
            ..Default::default()
        };

        let result = Entries::insert(active_model).exec(&self.conn).await?;
        let id = result.last_insert_id;

        debug!("Inserted entry '{}' with id {}", input.title, id);
        Ok((id > 0).then_some(id))
    }

    /// Copies the incoming record's display and source-owned fields onto an
    /// existing row. Identity, `favorite` and `added_at` are left untouched.
    pub async fn merge_fields(&self, id: i64, input: &EntryInput) -> Result<()> {
        let active_model = entries::ActiveModel {
            id: Set(id),
            title: Set(input.title.clone()),
            artist: Set(input.artist.clone()),
            author: Set(input.author.clone()),
            description: Set(input.description.clone()),
            genres: Set(Self::genres_json(input.genres.as_ref())),
            status: Set(input.status),
            thumbnail_url: Set(input.thumbnail_url.clone()),
            viewer_flags: Set(input.viewer_flags),
            ..Default::default()
        };

        Entries::update(active_model).exec(&self.conn).await?;
        Ok(())
    }
}
