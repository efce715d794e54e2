use sea_orm::entity::prelude::*;

/// Flat key-value application settings.
///
/// `kind` records the declared value type ("int", "long", "float", "string",
/// "bool", "string_set") and `value` holds the serialized payload.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub kind: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
