use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub source_id: i64,
    pub url: String,
    pub title: String,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub genres: Option<String>,
    pub status: i32,
    pub thumbnail_url: Option<String>,
    pub favorite: bool,
    pub added_at: i64,
    pub viewer_flags: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
    #[sea_orm(has_many = "super::tracks::Entity")]
    Tracks,
    #[sea_orm(has_one = "super::custom_entry_info::Entity")]
    CustomEntryInfo,
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::tracks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracks.def()
    }
}

impl Related<super::custom_entry_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomEntryInfo.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::entry_categories::Relation::Categories.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::entry_categories::Relation::Entries.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
