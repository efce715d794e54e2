pub mod category;
pub mod entry;
pub mod episode;
pub mod history;
pub mod preference;
pub mod track;
