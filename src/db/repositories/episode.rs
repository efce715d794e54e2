use crate::entities::{episodes, prelude::*};
use crate::models::episode::{Episode, EpisodeInput};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: episodes::Model) -> Episode {
        Episode {
            id: model.id,
            entry_id: model.entry_id,
            url: model.url,
            name: model.name,
            episode_number: model.episode_number,
            seen: model.seen,
            last_second_seen: model.last_second_seen,
            total_seconds: model.total_seconds,
            source_order: model.source_order,
        }
    }

    pub async fn get_for_entry(&self, entry_id: i64) -> Result<Vec<Episode>> {
        let rows = Episodes::find()
            .filter(episodes::Column::EntryId.eq(entry_id))
            .order_by_asc(episodes::Column::SourceOrder)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn upsert_many(&self, entry_id: i64, episodes: &[EpisodeInput]) -> Result<()> {
        if episodes.is_empty() {
            return Ok(());
        }

        let active_models: Vec<episodes::ActiveModel> = episodes
            .iter()
            .map(|episode| episodes::ActiveModel {
                entry_id: Set(entry_id),
                url: Set(episode.url.clone()),
                name: Set(episode.name.clone()),
                episode_number: Set(episode.episode_number),
                seen: Set(episode.seen),
                last_second_seen: Set(episode.last_second_seen),
                total_seconds: Set(episode.total_seconds),
                source_order: Set(episode.source_order),
                ..Default::default()
            })
            .collect();

        Episodes::insert_many(active_models)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    episodes::Column::EntryId,
                    episodes::Column::Url,
                ])
                .update_columns([
                    episodes::Column::Name,
                    episodes::Column::EpisodeNumber,
                    episodes::Column::Seen,
                    episodes::Column::LastSecondSeen,
                    episodes::Column::TotalSeconds,
                    episodes::Column::SourceOrder,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }
}
