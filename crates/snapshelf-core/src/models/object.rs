use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of a container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub name: String,
    pub size_bytes: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl ObjectEntry {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            last_modified: None,
        }
    }
}
