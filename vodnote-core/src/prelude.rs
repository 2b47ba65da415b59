//! Convenience re-exports for host applications.

pub use vodnote_model::prelude::*;

pub use crate::autosave::SessionAutosave;
pub use crate::channel::{Channel, Clock, SystemClock};
pub use crate::config::SyncSettings;
pub use crate::link::{LinkError, normalize};
pub use crate::notes::{NotesController, NotesEvent, TimeSource};
pub use crate::player::{
    MediaElement, PlayerAdapter, PlayerError, PlayerHandle, PlayerShape, RemoteControls, probe,
};
pub use crate::shortcuts::{FocusContext, Key, KeyChord, ShortcutAction, ShortcutDispatcher};
pub use crate::store::{MemoryStore, SessionCatalog, StoreError, VoddingStore};
pub use crate::url_codec::{decode, encode};
pub use crate::url_sync::{Clipboard, HashOutcome, LocationSink, UrlSynchronizer, interpret_fragment};
pub use crate::view_transform::ViewTransform;
