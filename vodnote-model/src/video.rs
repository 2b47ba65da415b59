use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Streaming provider the video belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Youtube,
}

/// A video under review, owned by exactly one session.
///
/// Immutable once created except for [`Video::rename`]: the name may be
/// replaced when the player surfaces the real title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    /// Canonical provider watch URL.
    pub url: String,
    pub name: String,
    pub provider: Provider,
    pub added_at: DateTime<Utc>,
}

impl Video {
    /// Create a video from an already-canonicalized watch URL.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            name: name.into(),
            provider: Provider::Youtube,
            added_at: Utc::now(),
        }
    }

    /// Adopt a real title once the player reports one.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
