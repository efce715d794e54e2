use serde::{Deserialize, Serialize};

/// Typed preference payload carried in a snapshot and applied to the
/// settings store through the matching typed setter.
///
/// The set of kinds is closed: the wire format is versioned, and decoding
/// rejects unknown kinds outright rather than dropping them silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PreferenceValue {
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
    Bool(bool),
    StringSet(Vec<String>),
}

impl PreferenceValue {
    /// Stable kind tag, also used as the `kind` column in the settings table.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::StringSet(_) => "string_set",
        }
    }
}
