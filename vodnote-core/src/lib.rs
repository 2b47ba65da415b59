//! Core library for Vodnote.
//!
//! Vodnote lets a reviewer paste a streaming-video link, watch it, and
//! attach timestamped notes, with the whole session shareable through a
//! URL fragment and persisted locally for later resumption. This crate
//! holds the headless machinery behind that flow:
//!
//! - [`player`] - one control surface over differently-shaped player
//!   backends, with runtime capability probing.
//! - [`shortcuts`] - declarative key bindings routed to player actions,
//!   suppressed while the user is typing.
//! - [`link`] - provider link validation and canonicalization.
//! - [`url_codec`] / [`url_sync`] - the shareable-link codec and the
//!   debounced location writer built on top of it.
//! - [`notes`] - the authoritative in-memory notes collection.
//! - [`store`] / [`autosave`] - the persistence contract and the
//!   controller that merges note growth into a saved session record.

pub mod autosave;
pub mod channel;
pub mod config;
pub mod link;
pub mod notes;
pub mod player;
pub mod prelude;
pub mod shortcuts;
pub mod store;
pub mod url_codec;
pub mod url_sync;
pub mod view_transform;

pub use autosave::SessionAutosave;
pub use channel::{Channel, Clock, SystemClock};
pub use config::SyncSettings;
pub use link::{LinkError, extract_video_id, normalize};
pub use notes::{NotesController, NotesEvent, TimeSource};
pub use player::{MediaElement, PlayerAdapter, PlayerError, PlayerHandle, RemoteControls};
pub use shortcuts::{FocusContext, Key, KeyChord, ShortcutAction, ShortcutDispatcher};
pub use store::{MemoryStore, SessionCatalog, StoreError, VoddingStore};
pub use url_sync::{Clipboard, HashOutcome, LocationSink, UrlSynchronizer};
pub use view_transform::ViewTransform;
