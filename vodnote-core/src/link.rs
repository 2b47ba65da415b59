//! Provider link validation and canonicalization.
//!
//! Any accepted input is reduced to one stable watch URL keyed by the
//! 11-character video id, so short links, embeds, shorts and live links
//! for the same video all collapse to the same session key.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

/// Canonical watch-URL prefix every accepted link collapses to.
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

static PATH_VIDEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(?:embed|shorts|live)/([\w-]{11})$").expect("valid regex"));

/// Errors reported to the user at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Invalid YouTube URL. Try: https://youtu.be/VIDEO_ID")]
    InvalidUrl,
}

/// Extract the provider video id from any of the accepted URL shapes:
/// `youtu.be/<id>`, `/watch?v=<id>`, `/embed/<id>`, `/shorts/<id>`,
/// `/live/<id>`.
pub fn extract_video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input).ok()?;
    let host = parsed.host_str()?;

    if host == "youtu.be" {
        let id = parsed.path().trim_start_matches('/');
        return (!id.is_empty() && !id.contains('/')).then(|| id.to_owned());
    }

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        if parsed.path() == "/watch" {
            return parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned());
        }
        return PATH_VIDEO_ID
            .captures(parsed.path())
            .map(|caps| caps[1].to_owned());
    }

    None
}

/// Canonicalize a pasted link to the stable watch-URL form.
///
/// Inputs that do not resolve to exactly an 11-character id are
/// rejected, never truncated or guessed.
pub fn normalize(input: &str) -> Result<String, LinkError> {
    let id = extract_video_id(input.trim()).ok_or(LinkError::InvalidUrl)?;
    if id.len() != 11 || !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return Err(LinkError::InvalidUrl);
    }
    Ok(format!("{WATCH_URL_PREFIX}{id}"))
}
