use serde::{Deserialize, Serialize};

use crate::Note;

/// Transport projection of session state for the shareable link.
///
/// Derived, never authoritative. `shared` is true iff the decoded
/// fragment explicitly carried a notes payload, which marks the link as
/// someone else's shared session rather than a bare video reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlState {
    pub video_url: Option<String>,
    pub notes: Vec<Note>,
    pub shared: bool,
}

impl UrlState {
    /// The neutral state every decode failure degrades to.
    pub fn empty() -> Self {
        Self::default()
    }
}
