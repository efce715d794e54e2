pub use super::categories::Entity as Categories;
pub use super::custom_entry_info::Entity as CustomEntryInfo;
pub use super::entries::Entity as Entries;
pub use super::entry_categories::Entity as EntryCategories;
pub use super::episodes::Entity as Episodes;
pub use super::history::Entity as History;
pub use super::settings::Entity as Settings;
pub use super::tracks::Entity as Tracks;
