use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
    pub flags: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
    pub sort_order: i32,
    pub flags: i32,
}
