use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Note, Video};

/// Persisted unit pairing one video with its notes.
///
/// Identified by its own id rather than the video id, so the same video
/// may appear in several sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vodding {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub video: Option<Video>,
    pub notes: Vec<Note>,
}

impl Vodding {
    /// Synthesize a fresh session record.
    pub fn new(video: Option<Video>, notes: Vec<Note>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            video,
            notes,
        }
    }

    /// Merge the latest notes into this record, preserving identity and
    /// creation time.
    pub fn with_notes(&self, notes: Vec<Note>) -> Self {
        Self {
            notes,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}
