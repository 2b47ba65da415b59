//! Session autosave: merge note growth into a persisted record.
//!
//! Saves fire only when the notes count *increased* since the last
//! observation; edits and deletes alone do not persist until the next
//! addition. That mirrors the upstream behavior and is kept as policy
//! here rather than widened quietly. While a save is already pending,
//! though, any observation refreshes the snapshot, so the write that
//! does go out carries the latest content.
//!
//! Like the URL channel, saves coalesce: a burst of additions inside
//! the quiet window produces one write carrying the final state.
//! Persistence is eventually consistent; the last write the user
//! observes wins, and a failed save simply waits for the next natural
//! mutation. A save racing teardown is cancelled, never applied late.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vodnote_model::{Note, Video, Vodding};

use crate::channel::{Channel, Clock, SystemClock};
use crate::store::VoddingStore;

/// Snapshot captured at observation time, written at the deadline.
#[derive(Debug, Clone)]
struct PendingSave {
    video: Option<Video>,
    notes: Vec<Note>,
}

/// Observes `(notes, video)` and persists a merged session record.
pub struct SessionAutosave {
    store: Arc<dyn VoddingStore>,
    clock: Arc<dyn Clock>,
    debounce: Duration,
    channel: Channel,
    pending: Option<PendingSave>,
    session: Option<Vodding>,
    last_seen_count: usize,
    last_saved_at: Option<DateTime<Utc>>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for SessionAutosave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAutosave")
            .field("channel", &self.channel)
            .field("session", &self.session.as_ref().map(|s| s.id))
            .field("last_seen_count", &self.last_seen_count)
            .finish()
    }
}

impl SessionAutosave {
    pub fn new(store: Arc<dyn VoddingStore>, debounce: Duration) -> Self {
        Self::with_clock(store, debounce, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn VoddingStore>,
        debounce: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            clock,
            debounce,
            channel: Channel::Idle,
            pending: None,
            session: None,
            last_seen_count: 0,
            last_saved_at: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Continue an existing session record; later saves merge into it.
    pub fn resume(&mut self, session: Vodding) {
        self.last_seen_count = session.notes.len();
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&Vodding> {
        self.session.as_ref()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// Observe the latest `(video, notes)` state.
    ///
    /// Schedules a coalesced save when the count grew and there is
    /// something to attach it to (a video or an existing session).
    pub fn observe(&mut self, video: Option<&Video>, notes: &[Note]) {
        let count = notes.len();
        let grew = count > self.last_seen_count;
        self.last_seen_count = count;

        if !grew {
            // An edit or delete inside an open quiet window refreshes
            // the snapshot; the coalesced write carries the latest
            // content even though growth is the only trigger.
            if self.channel.is_pending()
                && let Some(pending) = self.pending.as_mut()
            {
                pending.video = video.cloned().or(pending.video.take());
                pending.notes = notes.to_vec();
            }
            return;
        }
        if video.is_none() && self.session.is_none() {
            return;
        }

        self.pending = Some(PendingSave {
            video: video.cloned(),
            notes: notes.to_vec(),
        });
        self.channel = Channel::PendingWrite(self.clock.now() + self.debounce);
    }

    /// Advance the quiet-period timer, flushing a due save.
    pub async fn tick(&mut self) {
        if !self.channel.due(self.clock.now()) {
            return;
        }
        let Some(pending) = self.pending.take() else {
            self.channel = Channel::Idle;
            return;
        };

        let record = match &self.session {
            Some(existing) => existing.with_notes(pending.notes),
            None => Vodding::new(pending.video, pending.notes),
        };
        self.persist(record).await;
    }

    /// Deadline of the scheduled save, if one is pending.
    pub fn next_deadline(&self) -> Option<std::time::Instant> {
        match self.channel {
            Channel::PendingWrite(deadline) => Some(deadline),
            _ => None,
        }
    }

    /// Copy a shared link's notes into a fresh local record and save it
    /// (claiming the session). Returns the claimed record on success;
    /// a failed save yields `None` and leaves any prior session as is.
    pub async fn claim_shared(
        &mut self,
        video: Option<Video>,
        notes: &[Note],
    ) -> Option<Vodding> {
        let record = Vodding::new(video, notes.to_vec());
        self.last_seen_count = notes.len();
        if self.persist(record).await {
            self.session.clone()
        } else {
            None
        }
    }

    /// Tear down. An in-flight save must not apply its result after
    /// this returns.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Explicit "new session" reset: cancel in-flight work and forget
    /// the tracked record.
    pub fn reset(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.channel = Channel::Idle;
        self.pending = None;
        self.session = None;
        self.last_seen_count = 0;
    }

    /// Reports whether the save applied.
    async fn persist(&mut self, record: Vodding) -> bool {
        self.channel = Channel::Writing;
        let cancel = self.cancel.clone();
        // Biased so a token cancelled before the save is polled always
        // wins; a teardown-raced save must never apply.
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(session = %record.id, "save cancelled by teardown");
                self.channel = Channel::Idle;
                return false;
            }
            result = self.store.save(&record) => result,
        };
        self.channel = Channel::Idle;

        match outcome {
            Ok(()) => {
                self.last_saved_at = Some(Utc::now());
                self.session = Some(record);
                true
            }
            // Notes stay correct in memory; the next mutation retries.
            Err(err) => {
                warn!(error = %err, "session autosave failed");
                false
            }
        }
    }
}
