//! Pure codec between session state and the URL hash fragment.
//!
//! The fragment is query-shaped (`v=...&n=...&n=...`) and percent
//! encoded, so it survives chat and email paste. Decoding is total:
//! malformed input degrades to the empty state instead of erroring.
//!
//! Round-trip law: `decode(encode(v, notes))` reproduces the video URL
//! and every `{timestamp, content}` pair exactly. Note ids and audit
//! timestamps are transport casualties, regenerated deterministically
//! (see [`Note::from_transport`]) so encode∘decode is idempotent.

use url::form_urlencoded;
use vodnote_model::{Note, UrlState};

/// Encode a video reference and notes into a hash fragment (without
/// the leading `#`).
pub fn encode(video_url: Option<&str>, notes: &[Note]) -> String {
    let mut fragment = form_urlencoded::Serializer::new(String::new());
    if let Some(url) = video_url {
        fragment.append_pair("v", url);
    }
    for note in notes {
        fragment.append_pair("n", &format!("{}:{}", note.timestamp, note.content));
    }
    fragment.finish()
}

/// Decode a hash fragment back into a transport state.
///
/// Tolerates an absent fragment, a video-only fragment, and garbage;
/// `shared` is set iff at least one note survived decoding.
pub fn decode(fragment: &str) -> UrlState {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    if raw.is_empty() {
        return UrlState::empty();
    }

    let mut state = UrlState::empty();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "v" => state.video_url = Some(value.into_owned()),
            "n" => {
                if let Some(note) = parse_note(&value) {
                    state.notes.push(note);
                }
            }
            _ => {}
        }
    }
    state.shared = !state.notes.is_empty();
    state
}

fn parse_note(raw: &str) -> Option<Note> {
    let (timestamp, content) = raw.split_once(':')?;
    let timestamp = timestamp.parse::<f64>().ok()?;
    if !timestamp.is_finite() || timestamp < 0.0 {
        return None;
    }
    Some(Note::from_transport(timestamp, content))
}
