use crate::entities::{prelude::*, tracks};
use crate::models::track::{Track, TrackInput};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct TrackRepository {
    conn: DatabaseConnection,
}

impl TrackRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: tracks::Model) -> Track {
        Track {
            id: model.id,
            entry_id: model.entry_id,
            tracker_id: model.tracker_id,
            remote_id: model.remote_id,
            remote_url: model.remote_url,
            title: model.title,
            last_episode_seen: model.last_episode_seen,
            total_episodes: model.total_episodes,
            score: model.score,
            status: model.status,
        }
    }

    pub async fn get_for_entry(&self, entry_id: i64) -> Result<Vec<Track>> {
        let rows = Tracks::find()
            .filter(tracks::Column::EntryId.eq(entry_id))
            .order_by_asc(tracks::Column::TrackerId)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn upsert_many(&self, entry_id: i64, tracks: &[TrackInput]) -> Result<()> {
        if tracks.is_empty() {
            return Ok(());
        }

        let active_models: Vec<tracks::ActiveModel> = tracks
            .iter()
            .map(|track| tracks::ActiveModel {
                entry_id: Set(entry_id),
                tracker_id: Set(track.tracker_id),
                remote_id: Set(track.remote_id),
                remote_url: Set(track.remote_url.clone()),
                title: Set(track.title.clone()),
                last_episode_seen: Set(track.last_episode_seen),
                total_episodes: Set(track.total_episodes),
                score: Set(track.score),
                status: Set(track.status),
                ..Default::default()
            })
            .collect();

        Tracks::insert_many(active_models)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    tracks::Column::EntryId,
                    tracks::Column::TrackerId,
                ])
                .update_columns([
                    tracks::Column::RemoteId,
                    tracks::Column::RemoteUrl,
                    tracks::Column::Title,
                    tracks::Column::LastEpisodeSeen,
                    tracks::Column::TotalEpisodes,
                    tracks::Column::Score,
                    tracks::Column::Status,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }
}
