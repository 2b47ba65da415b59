use super::handle::{MediaElement, PlayerHandle, RemoteControls};

/// Resolved shape of a player handle.
///
/// A remote player may additionally expose a media element; `seek`
/// uses it to resume playback after a remote jump.
#[derive(Clone, Copy)]
pub enum PlayerShape<'a> {
    Remote {
        api: &'a dyn RemoteControls,
        media: Option<&'a dyn MediaElement>,
    },
    Native(&'a dyn MediaElement),
    Unknown,
}

impl std::fmt::Debug for PlayerShape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerShape::Remote { media, .. } => f
                .debug_struct("Remote")
                .field("media", &media.is_some())
                .finish(),
            PlayerShape::Native(_) => f.debug_tuple("Native").finish(),
            PlayerShape::Unknown => f.debug_tuple("Unknown").finish(),
        }
    }
}

/// Inspect a handle and pick the dispatch variant.
///
/// Precedence: a wrapped remote API wins over a native media element;
/// a handle exposing neither is probed one level deeper through
/// `internal_player`. Anything else is `Unknown`.
pub fn probe(handle: &dyn PlayerHandle) -> PlayerShape<'_> {
    if let Some(api) = handle.remote() {
        return PlayerShape::Remote {
            api,
            media: handle.media(),
        };
    }
    if let Some(media) = handle.media() {
        return PlayerShape::Native(media);
    }
    if let Some(inner) = handle.internal_player() {
        if let Some(api) = inner.remote() {
            return PlayerShape::Remote {
                api,
                media: inner.media(),
            };
        }
        if let Some(media) = inner.media() {
            return PlayerShape::Native(media);
        }
    }
    PlayerShape::Unknown
}
