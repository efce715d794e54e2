/// Last-consumed timestamp for one episode url (epoch millis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub episode_url: String,
    pub seen_at: i64,
}
