//! The authoritative in-memory notes collection for the active session.
//!
//! Dependents (autosave, URL sync, the note list) observe mutations
//! through an injected `on_change` hook invoked synchronously after the
//! state is committed, so they always see a consistent array, never a
//! partial one.

use std::sync::Arc;

use vodnote_model::Note;

use crate::player::PlayerAdapter;

/// Source of the current playback position for new notes.
pub trait TimeSource: Send + Sync {
    fn current_time(&self) -> Option<f64>;
}

impl TimeSource for PlayerAdapter {
    fn current_time(&self) -> Option<f64> {
        PlayerAdapter::current_time(self)
    }
}

/// Why the collection changed. Adoption resets any in-progress edit
/// state held by dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesEvent {
    Added,
    Edited,
    Deleted,
    Adopted,
}

type ChangeHook = Box<dyn FnMut(&[Note]) + Send>;
type EventHook = Box<dyn FnMut(NotesEvent) + Send>;

/// In-memory notes with add/edit/delete and external-state adoption.
#[derive(Default)]
pub struct NotesController {
    notes: Vec<Note>,
    time: Option<Arc<dyn TimeSource>>,
    on_change: Option<ChangeHook>,
    on_event: Option<EventHook>,
}

impl std::fmt::Debug for NotesController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesController")
            .field("notes", &self.notes.len())
            .finish()
    }
}

impl NotesController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            ..Self::default()
        }
    }

    /// Playback position source for new notes; absent means 0.
    pub fn set_time_source(&mut self, time: Arc<dyn TimeSource>) {
        self.time = Some(time);
    }

    pub fn set_on_change(&mut self, hook: impl FnMut(&[Note]) + Send + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    pub fn set_on_event(&mut self, hook: impl FnMut(NotesEvent) + Send + 'static) {
        self.on_event = Some(Box::new(hook));
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Append a note at the current playback position.
    ///
    /// Blank or whitespace-only content is a no-op. Returns the id of
    /// the new note.
    pub fn add_note(&mut self, content: &str) -> Option<String> {
        if content.trim().is_empty() {
            return None;
        }
        let position = self
            .time
            .as_ref()
            .and_then(|t| t.current_time())
            .unwrap_or(0.0);
        let note = Note::new(content, position);
        let id = note.id.clone();
        self.notes.push(note);
        self.committed(NotesEvent::Added);
        Some(id)
    }

    /// Replace a note's content, bumping its `updated_at`. No-op when
    /// the id is unknown.
    pub fn edit_note(&mut self, id: &str, content: &str) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        note.edit(content);
        self.committed(NotesEvent::Edited);
        true
    }

    /// Remove a note by id. No-op when absent.
    pub fn delete_note(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return false;
        }
        self.committed(NotesEvent::Deleted);
        true
    }

    /// Wholesale replacement when switching to a shared or restored
    /// session.
    pub fn adopt_external(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.committed(NotesEvent::Adopted);
    }

    fn committed(&mut self, event: NotesEvent) {
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.notes);
        }
        if let Some(hook) = self.on_event.as_mut() {
            hook(event);
        }
    }
}
