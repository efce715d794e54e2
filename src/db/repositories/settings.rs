use crate::entities::{prelude::*, settings};
use crate::models::preference::PreferenceValue;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::warn;

/// Flat key-value settings store with typed setters, one per preference kind.
pub struct SettingsRepository {
    conn: DatabaseConnection,
}

impl SettingsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn set_raw(&self, key: &str, kind: &str, value: String) -> Result<()> {
        let active_model = settings::ActiveModel {
            key: Set(key.to_string()),
            kind: Set(kind.to_string()),
            value: Set(value),
        };

        Settings::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(settings::Column::Key)
                    .update_columns([settings::Column::Kind, settings::Column::Value])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn set_int(&self, key: &str, value: i32) -> Result<()> {
        self.set_raw(key, "int", value.to_string()).await
    }

    pub async fn set_long(&self, key: &str, value: i64) -> Result<()> {
        self.set_raw(key, "long", value.to_string()).await
    }

    pub async fn set_float(&self, key: &str, value: f32) -> Result<()> {
        self.set_raw(key, "float", value.to_string()).await
    }

    pub async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set_raw(key, "string", value.to_string()).await
    }

    pub async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set_raw(key, "bool", value.to_string()).await
    }

    pub async fn set_string_set(&self, key: &str, value: &[String]) -> Result<()> {
        self.set_raw(key, "string_set", serde_json::to_string(value)?)
            .await
    }

    pub async fn get(&self, key: &str) -> Result<Option<PreferenceValue>> {
        let row = Settings::find_by_id(key).one(&self.conn).await?;
        Ok(row.and_then(|m| Self::parse_row(&m.key, &m.kind, &m.value)))
    }

    pub async fn list_all(&self) -> Result<Vec<(String, PreferenceValue)>> {
        let rows = Settings::find()
            .order_by_asc(settings::Column::Key)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                Self::parse_row(&m.key, &m.kind, &m.value).map(|value| (m.key, value))
            })
            .collect())
    }

    fn parse_row(key: &str, kind: &str, value: &str) -> Option<PreferenceValue> {
        let parsed = match kind {
            "int" => value.parse().ok().map(PreferenceValue::Int),
            "long" => value.parse().ok().map(PreferenceValue::Long),
            "float" => value.parse().ok().map(PreferenceValue::Float),
            "string" => Some(PreferenceValue::String(value.to_string())),
            "bool" => value.parse().ok().map(PreferenceValue::Bool),
            "string_set" => serde_json::from_str(value).ok().map(PreferenceValue::StringSet),
            _ => None,
        };

        if parsed.is_none() {
            warn!("Skipping unreadable setting '{key}' of kind '{kind}'");
        }
        parsed
    }
}
