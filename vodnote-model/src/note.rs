use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for ids of notes rebuilt from a transport projection, so a
/// decoded `{timestamp, content}` pair always maps to the same id.
const TRANSPORT_NAMESPACE: Uuid = Uuid::from_u128(0x6f3d_a1c2_9b7e_4d05_8a41_c0de_5e55_10ed);

/// A timestamped review note.
///
/// Notes are owned by exactly one session. Insertion order is the
/// default display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque unique id.
    pub id: String,
    pub content: String,
    /// Playback position in seconds. Fractional, never negative.
    pub timestamp: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note at the given playback position.
    pub fn new(content: impl Into<String>, timestamp: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            timestamp: timestamp.max(0.0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a note carried by a shareable link.
    ///
    /// The transport projection drops ids and audit timestamps, so the id
    /// is regenerated deterministically from the surviving fields.
    pub fn from_transport(timestamp: f64, content: &str) -> Self {
        let seed = format!("{timestamp}:{content}");
        let now = Utc::now();
        Self {
            id: Uuid::new_v5(&TRANSPORT_NAMESPACE, seed.as_bytes()).to_string(),
            content: content.to_owned(),
            timestamp: timestamp.max(0.0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content and bump `updated_at`.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_timestamps_clamp_to_zero() {
        let note = Note::new("before the clock started", -3.5);
        assert_eq!(note.timestamp, 0.0);
    }

    #[test]
    fn transport_ids_are_deterministic() {
        let a = Note::from_transport(42.3, "good rotation");
        let b = Note::from_transport(42.3, "good rotation");
        let c = Note::from_transport(42.4, "good rotation");

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn edit_bumps_updated_at() {
        let mut note = Note::new("first draft", 10.0);
        let created = note.created_at;

        note.edit("second draft");

        assert_eq!(note.content, "second draft");
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= created);
    }
}
