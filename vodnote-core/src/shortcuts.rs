//! Global keyboard shortcut routing.
//!
//! The binding table is declarative data, not scattered match arms, so
//! the set can be swapped wholesale when its dependencies change (a
//! video appearing, say) without leaking the previous registration:
//! [`ShortcutDispatcher::rebind`] replaces the whole table, and only
//! the current table is ever consulted.

use std::collections::HashMap;

use crate::player::PlayerAdapter;
use crate::view_transform::ViewTransform;

/// Keys that participate in shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// A key plus its modifier, the unit the binding table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub alt: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self { key, alt: false }
    }

    pub fn alt(key: Key) -> Self {
        Self { key, alt: true }
    }
}

/// What a chord does when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    TogglePlay,
    SeekBy(f64),
    AdjustVolume(f64),
    ToggleMapView,
}

impl ShortcutAction {
    /// Playback actions are suppressed while the user is typing; the
    /// view toggle is not, since it has no playback side effect.
    fn suppressed_while_typing(&self) -> bool {
        !matches!(self, ShortcutAction::ToggleMapView)
    }
}

/// Where key events currently land.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusContext {
    /// The focused element is a text input, textarea, or editable node.
    pub typing: bool,
}

/// Routes key chords to player and view actions.
#[derive(Debug, Default)]
pub struct ShortcutDispatcher {
    bindings: HashMap<KeyChord, ShortcutAction>,
}

impl ShortcutDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock review bindings: space/`k` toggle play, `j`/`l` seek
    /// 5 s, arrows seek 10 s and step volume, `alt+m` toggles the map
    /// view.
    pub fn with_standard_bindings() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.rebind([
            (KeyChord::plain(Key::Space), ShortcutAction::TogglePlay),
            (KeyChord::plain(Key::Char('k')), ShortcutAction::TogglePlay),
            (KeyChord::plain(Key::Char('j')), ShortcutAction::SeekBy(-5.0)),
            (KeyChord::plain(Key::Char('l')), ShortcutAction::SeekBy(5.0)),
            (KeyChord::plain(Key::ArrowLeft), ShortcutAction::SeekBy(-10.0)),
            (KeyChord::plain(Key::ArrowRight), ShortcutAction::SeekBy(10.0)),
            (KeyChord::plain(Key::ArrowUp), ShortcutAction::AdjustVolume(0.1)),
            (KeyChord::plain(Key::ArrowDown), ShortcutAction::AdjustVolume(-0.1)),
            (KeyChord::alt(Key::Char('m')), ShortcutAction::ToggleMapView),
        ]);
        dispatcher
    }

    /// Replace the whole binding set. The previous registration is
    /// gone after this returns; nothing can double-fire.
    pub fn rebind(&mut self, bindings: impl IntoIterator<Item = (KeyChord, ShortcutAction)>) {
        self.bindings = bindings.into_iter().collect();
    }

    /// Resolve a chord to the action that should fire, if any.
    ///
    /// Nothing fires without a loaded video, and playback actions are
    /// suppressed while the user types.
    pub fn resolve(
        &self,
        chord: KeyChord,
        ctx: FocusContext,
        video_loaded: bool,
    ) -> Option<ShortcutAction> {
        if !video_loaded {
            return None;
        }
        let action = *self.bindings.get(&chord)?;
        if ctx.typing && action.suppressed_while_typing() {
            return None;
        }
        Some(action)
    }

    /// Resolve and execute in one step. Returns true when the chord
    /// was consumed (the caller should swallow the event).
    pub fn dispatch(
        &self,
        chord: KeyChord,
        ctx: FocusContext,
        video_loaded: bool,
        adapter: &PlayerAdapter,
        view: &mut ViewTransform,
    ) -> bool {
        let Some(action) = self.resolve(chord, ctx, video_loaded) else {
            return false;
        };
        match action {
            ShortcutAction::TogglePlay => adapter.toggle_play(),
            ShortcutAction::SeekBy(delta) => adapter.seek_by(delta),
            ShortcutAction::AdjustVolume(delta) => adapter.adjust_volume(delta),
            ShortcutAction::ToggleMapView => view.toggle_map_view(),
        }
        true
    }
}
