pub mod prelude;

pub mod categories;
pub mod custom_entry_info;
pub mod entries;
pub mod entry_categories;
pub mod episodes;
pub mod history;
pub mod settings;
pub mod tracks;
