use crate::entities::{history, prelude::*};
use crate::models::history::HistoryRecord;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upserts records in order; a later record for the same episode url
    /// replaces an earlier one.
    pub async fn upsert_many(&self, records: &[HistoryRecord]) -> Result<()> {
        for record in records {
            let active_model = history::ActiveModel {
                episode_url: Set(record.episode_url.clone()),
                seen_at: Set(record.seen_at),
                ..Default::default()
            };

            History::insert(active_model)
                .on_conflict(
                    sea_orm::sea_query::OnConflict::column(history::Column::EpisodeUrl)
                        .update_column(history::Column::SeenAt)
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await?;
        }

        Ok(())
    }

    pub async fn get_for_urls(&self, urls: &[String]) -> Result<Vec<HistoryRecord>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let rows = History::find()
            .filter(history::Column::EpisodeUrl.is_in(urls.iter().cloned()))
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| HistoryRecord {
                episode_url: m.episode_url,
                seen_at: m.seen_at,
            })
            .collect())
    }
}
