pub mod category;
pub mod custom_info;
pub mod entry;
pub mod episode;
pub mod history;
pub mod settings;
pub mod track;
