use crate::entities::custom_entry_info;
use crate::models::entry::CustomEntryInfo;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

pub struct CustomInfoRepository {
    conn: DatabaseConnection,
}

impl CustomInfoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn save(&self, info: &CustomEntryInfo) -> Result<()> {
        let active_model = custom_entry_info::ActiveModel {
            entry_id: Set(info.entry_id),
            title: Set(info.title.clone()),
            artist: Set(info.artist.clone()),
            author: Set(info.author.clone()),
            description: Set(info.description.clone()),
            genres: Set(info
                .genres
                .as_ref()
                .and_then(|g| serde_json::to_string(g).ok())),
        };

        custom_entry_info::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(custom_entry_info::Column::EntryId)
                    .update_columns([
                        custom_entry_info::Column::Title,
                        custom_entry_info::Column::Artist,
                        custom_entry_info::Column::Author,
                        custom_entry_info::Column::Description,
                        custom_entry_info::Column::Genres,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn get(&self, entry_id: i64) -> Result<Option<CustomEntryInfo>> {
        let result = custom_entry_info::Entity::find_by_id(entry_id)
            .one(&self.conn)
            .await?;

        Ok(result.map(|m| CustomEntryInfo {
            entry_id: m.entry_id,
            title: m.title,
            artist: m.artist,
            author: m.author,
            description: m.description,
            genres: m.genres.and_then(|s| serde_json::from_str(&s).ok()),
        }))
    }
}
