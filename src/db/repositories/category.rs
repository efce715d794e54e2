use crate::entities::{categories, entry_categories, prelude::*};
use crate::models::category::{Category, CategoryInput};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: categories::Model) -> Category {
        Category {
            id: model.id,
            name: model.name,
            sort_order: model.sort_order,
            flags: model.flags,
        }
    }

    /// Upserts a category by name and returns its local id.
    pub async fn upsert(&self, input: &CategoryInput) -> Result<i64> {
        let existing = Categories::find()
            .filter(categories::Column::Name.eq(input.name.clone()))
            .one(&self.conn)
            .await?;

        if let Some(model) = existing {
            let id = model.id;
            let mut active_model: categories::ActiveModel = model.into();
            active_model.sort_order = Set(input.sort_order);
            active_model.flags = Set(input.flags);
            Categories::update(active_model).exec(&self.conn).await?;
            return Ok(id);
        }

        let active_model = categories::ActiveModel {
            name: Set(input.name.clone()),
            sort_order: Set(input.sort_order),
            flags: Set(input.flags),
            ..Default::default()
        };

        let result = Categories::insert(active_model).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let rows = Categories::find()
            .order_by_asc(categories::Column::SortOrder)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn assign_to_entry(&self, entry_id: i64, category_ids: &[i64]) -> Result<()> {
        if category_ids.is_empty() {
            return Ok(());
        }

        let active_models: Vec<entry_categories::ActiveModel> = category_ids
            .iter()
            .map(|category_id| entry_categories::ActiveModel {
                entry_id: Set(entry_id),
                category_id: Set(*category_id),
            })
            .collect();

        EntryCategories::insert_many(active_models)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    entry_categories::Column::EntryId,
                    entry_categories::Column::CategoryId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn names_for_entry(&self, entry_id: i64) -> Result<Vec<String>> {
        let assignments = EntryCategories::find()
            .filter(entry_categories::Column::EntryId.eq(entry_id))
            .all(&self.conn)
            .await?;

        let ids: Vec<i64> = assignments.iter().map(|a| a.category_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Categories::find()
            .filter(categories::Column::Id.is_in(ids))
            .order_by_asc(categories::Column::SortOrder)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(|c| c.name).collect())
    }
}
