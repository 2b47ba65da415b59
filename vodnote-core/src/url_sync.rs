//! Debounced synchronization of session state into the location hash.
//!
//! Writer side: every `(video, notes)` change is hashed and compared
//! against the last write. A video change rewrites the fragment
//! immediately (the shareable target changed); notes-only changes
//! coalesce behind a trailing debounce, one write per quiet window.
//! The whole channel suspends while the state came from someone else's
//! shared link, until the session is claimed.
//!
//! Reader side: [`interpret_fragment`] is the one-shot decision made on
//! load or hash navigation, choosing between a shared read-only
//! payload, resuming a stored session, and a bare video load.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;
use vodnote_model::{Note, Vodding};

use crate::channel::{Channel, Clock, SystemClock};
use crate::store::VoddingStore;
use crate::url_codec;

/// Destination for fragment writes, the browser location analogue.
pub trait LocationSink {
    /// Replace the fragment portion of the current location.
    fn write_fragment(&mut self, fragment: &str);
    /// Origin + path, without any fragment.
    fn base_url(&self) -> String;
}

/// Best-effort clipboard. Failure is a normal outcome, not an error.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> bool;
}

/// Debounced, change-detecting writer of session state to the URL.
pub struct UrlSynchronizer {
    clock: Arc<dyn Clock>,
    debounce: Duration,
    channel: Channel,
    pending_fragment: Option<String>,
    last_video_url: Option<String>,
    last_notes_hash: Option<[u8; 32]>,
    shared: bool,
}

impl std::fmt::Debug for UrlSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSynchronizer")
            .field("channel", &self.channel)
            .field("shared", &self.shared)
            .finish()
    }
}

impl UrlSynchronizer {
    pub fn new(debounce: Duration) -> Self {
        Self::with_clock(debounce, Arc::new(SystemClock))
    }

    pub fn with_clock(debounce: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            debounce,
            channel: Channel::Idle,
            pending_fragment: None,
            last_video_url: None,
            last_notes_hash: None,
            shared: false,
        }
    }

    /// Whether the current state arrived via someone else's link.
    pub fn shared(&self) -> bool {
        self.shared
    }

    /// Enter or leave shared mode. While shared, writes are suspended
    /// so local edits never overwrite the link they came from.
    pub fn set_shared(&mut self, shared: bool) {
        self.shared = shared;
        if shared {
            self.cancel_pending();
        }
    }

    /// Observe the current `(video, notes)` state.
    ///
    /// Skips the write when neither the video URL nor the notes content
    /// hash changed. A video change flushes immediately, preempting any
    /// pending notes write; a notes-only change restarts the trailing
    /// debounce.
    pub fn on_change(
        &mut self,
        video_url: Option<&str>,
        notes: &[Note],
        sink: &mut dyn LocationSink,
    ) {
        if self.shared {
            return;
        }

        let notes_hash = notes_digest(notes);
        let video_changed = self.last_video_url.as_deref() != video_url;
        let notes_changed = self.last_notes_hash != Some(notes_hash);
        if !video_changed && !notes_changed {
            return;
        }

        self.last_video_url = video_url.map(str::to_owned);
        self.last_notes_hash = Some(notes_hash);

        let fragment = url_codec::encode(video_url, notes);
        if video_changed && video_url.is_some() {
            self.cancel_pending();
            self.write(fragment, sink);
            return;
        }

        self.pending_fragment = Some(fragment);
        self.channel = Channel::PendingWrite(self.clock.now() + self.debounce);
    }

    /// Advance the debounce timer, flushing an expired pending write.
    /// The host calls this from its tick/timer source.
    pub fn tick(&mut self, sink: &mut dyn LocationSink) {
        if !self.channel.due(self.clock.now()) {
            return;
        }
        if let Some(fragment) = self.pending_fragment.take() {
            self.write(fragment, sink);
        } else {
            self.channel = Channel::Idle;
        }
    }

    /// Deadline of the pending write, if one is scheduled.
    pub fn next_deadline(&self) -> Option<std::time::Instant> {
        match self.channel {
            Channel::PendingWrite(deadline) => Some(deadline),
            _ => None,
        }
    }

    /// Drop any pending write without flushing it. Called on unmount;
    /// a torn-down page must not be written to.
    pub fn detach(&mut self) {
        self.cancel_pending();
    }

    /// Claim a shared session as local: lift the suspension and write
    /// the claimed state through immediately.
    pub fn claim(&mut self, video_url: Option<&str>, notes: &[Note], sink: &mut dyn LocationSink) {
        self.shared = false;
        self.last_video_url = video_url.map(str::to_owned);
        self.last_notes_hash = Some(notes_digest(notes));
        self.write(url_codec::encode(video_url, notes), sink);
    }

    /// Current shareable URL, synchronously, bypassing the debounce.
    pub fn shareable_url(
        &self,
        video_url: Option<&str>,
        notes: &[Note],
        sink: &dyn LocationSink,
    ) -> String {
        let base = sink.base_url();
        match video_url {
            Some(_) => format!("{base}#{}", url_codec::encode(video_url, notes)),
            None => base,
        }
    }

    /// Copy the shareable URL; reports clipboard success as a boolean.
    pub fn copy_shareable_url(
        &self,
        video_url: Option<&str>,
        notes: &[Note],
        sink: &dyn LocationSink,
        clipboard: &mut dyn Clipboard,
    ) -> bool {
        clipboard.write_text(&self.shareable_url(video_url, notes, sink))
    }

    fn write(&mut self, fragment: String, sink: &mut dyn LocationSink) {
        self.channel = Channel::Writing;
        sink.write_fragment(&fragment);
        self.channel = Channel::Idle;
    }

    fn cancel_pending(&mut self) {
        if self.channel.is_pending() {
            debug!("cancelling pending url write");
        }
        self.pending_fragment = None;
        self.channel = Channel::Idle;
    }
}

/// Content hash of the notes list: order, timestamp and content only,
/// so audit-timestamp churn never causes a URL write.
fn notes_digest(notes: &[Note]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for note in notes {
        hasher.update(note.timestamp.to_bits().to_le_bytes());
        hasher.update((note.content.len() as u64).to_le_bytes());
        hasher.update(note.content.as_bytes());
    }
    hasher.finalize().into()
}

/// Decision made from the location fragment on load or navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum HashOutcome {
    /// Nothing usable in the fragment.
    None,
    /// Resume a locally stored session.
    Resume(Vodding),
    /// Read-only payload from someone else's shared link.
    Shared { video_url: String, notes: Vec<Note> },
    /// Bare video reference for a fresh session.
    Video { video_url: String },
}

impl HashOutcome {
    /// Position to jump to once the player is ready: a shared link
    /// carrying exactly one note doubles as a deep link to its moment.
    pub fn pending_seek(&self) -> Option<f64> {
        match self {
            HashOutcome::Shared { notes, .. } if notes.len() == 1 && notes[0].timestamp > 0.0 => {
                Some(notes[0].timestamp)
            }
            _ => None,
        }
    }
}

/// One-shot reader for the location fragment.
///
/// A fragment carrying notes is someone else's shared session and wins
/// outright. Otherwise a remembered session id is resumed from the
/// store when it still loads; store failures fall through to treating
/// the fragment as a bare video reference.
pub async fn interpret_fragment(
    fragment: &str,
    store: &dyn VoddingStore,
    remembered_session: Option<Uuid>,
) -> HashOutcome {
    let state = url_codec::decode(fragment);
    let Some(video_url) = state.video_url else {
        return HashOutcome::None;
    };

    if state.shared {
        return HashOutcome::Shared {
            video_url,
            notes: state.notes,
        };
    }

    if let Some(id) = remembered_session {
        match store.load_by_id(id).await {
            Ok(Some(session)) => return HashOutcome::Resume(session),
            Ok(None) => {}
            Err(err) => debug!(error = %err, "session resume failed, falling back to url"),
        }
    }

    HashOutcome::Video { video_url }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Debug)]
    struct FakeClock {
        now: Mutex<Instant>,
    }

    impl FakeClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Instant::now()),
            })
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        writes: Vec<String>,
    }

    impl LocationSink for RecordingSink {
        fn write_fragment(&mut self, fragment: &str) {
            self.writes.push(fragment.to_owned());
        }
        fn base_url(&self) -> String {
            "https://vodnote.test/".to_owned()
        }
    }

    struct FailingClipboard;
    impl Clipboard for FailingClipboard {
        fn write_text(&mut self, _text: &str) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct CapturingClipboard(Option<String>);
    impl Clipboard for CapturingClipboard {
        fn write_text(&mut self, text: &str) -> bool {
            self.0 = Some(text.to_owned());
            true
        }
    }

    const VIDEO: &str = "https://www.youtube.com/watch?v=FOatagUO-Z0";
    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn synced(clock: &Arc<FakeClock>) -> UrlSynchronizer {
        UrlSynchronizer::with_clock(DEBOUNCE, clock.clone() as Arc<dyn Clock>)
    }

    #[test]
    fn video_change_writes_immediately() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();

        sync.on_change(Some(VIDEO), &[], &mut sink);

        assert_eq!(sink.writes.len(), 1);
        assert!(sink.writes[0].contains("FOatagUO-Z0"));
    }

    #[test]
    fn notes_burst_coalesces_into_one_write() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();

        sync.on_change(Some(VIDEO), &[], &mut sink);
        assert_eq!(sink.writes.len(), 1);

        let mut notes = Vec::new();
        for i in 0..5 {
            notes.push(Note::new(format!("note {i}"), i as f64));
            sync.on_change(Some(VIDEO), &notes, &mut sink);
            clock.advance(Duration::from_millis(20));
            sync.tick(&mut sink);
        }
        // Still inside the quiet window: no notes write yet.
        assert_eq!(sink.writes.len(), 1);

        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);

        assert_eq!(sink.writes.len(), 2);
        let decoded = url_codec::decode(&sink.writes[1]);
        assert_eq!(decoded.notes.len(), 5);
    }

    #[test]
    fn each_change_restarts_the_quiet_window() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();
        sync.on_change(Some(VIDEO), &[], &mut sink);

        let notes = vec![Note::new("one", 1.0)];
        sync.on_change(Some(VIDEO), &notes, &mut sink);
        clock.advance(Duration::from_millis(400));
        sync.tick(&mut sink);

        let notes = vec![Note::new("one", 1.0), Note::new("two", 2.0)];
        sync.on_change(Some(VIDEO), &notes, &mut sink);
        clock.advance(Duration::from_millis(400));
        sync.tick(&mut sink);
        assert_eq!(sink.writes.len(), 1, "window restarted, nothing due yet");

        clock.advance(Duration::from_millis(100));
        sync.tick(&mut sink);
        assert_eq!(sink.writes.len(), 2);
    }

    #[test]
    fn unchanged_state_is_skipped() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();
        let notes = vec![Note::new("same", 5.0)];

        sync.on_change(Some(VIDEO), &notes, &mut sink);
        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);
        let writes = sink.writes.len();

        sync.on_change(Some(VIDEO), &notes, &mut sink);
        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);

        assert_eq!(sink.writes.len(), writes);
    }

    #[test]
    fn video_change_preempts_a_pending_notes_write() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();
        sync.on_change(Some(VIDEO), &[], &mut sink);

        let notes = vec![Note::new("pending", 3.0)];
        sync.on_change(Some(VIDEO), &notes, &mut sink);
        sync.on_change(Some("https://www.youtube.com/watch?v=mxzx2Ps7OY0"), &notes, &mut sink);

        assert_eq!(sink.writes.len(), 2);
        assert!(sink.writes[1].contains("mxzx2Ps7OY0"));

        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);
        assert_eq!(sink.writes.len(), 2, "pending write was preempted, not queued");
    }

    #[test]
    fn shared_mode_suspends_writes_until_claimed() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();
        sync.set_shared(true);

        let notes = vec![Note::new("theirs", 1.0)];
        sync.on_change(Some(VIDEO), &notes, &mut sink);
        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);
        assert!(sink.writes.is_empty());

        sync.claim(Some(VIDEO), &notes, &mut sink);
        assert_eq!(sink.writes.len(), 1);
        assert!(!sync.shared());

        // Post-claim edits flow again.
        let notes = vec![Note::new("theirs", 1.0), Note::new("mine", 2.0)];
        sync.on_change(Some(VIDEO), &notes, &mut sink);
        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);
        assert_eq!(sink.writes.len(), 2);
    }

    #[test]
    fn detach_cancels_without_flushing() {
        let clock = FakeClock::new();
        let mut sync = synced(&clock);
        let mut sink = RecordingSink::default();
        sync.on_change(Some(VIDEO), &[], &mut sink);

        sync.on_change(Some(VIDEO), &[Note::new("late", 9.0)], &mut sink);
        sync.detach();
        clock.advance(DEBOUNCE);
        sync.tick(&mut sink);

        assert_eq!(sink.writes.len(), 1);
        assert_eq!(sync.next_deadline(), None);
    }

    #[test]
    fn shareable_url_bypasses_the_debounce() {
        let clock = FakeClock::new();
        let sync = synced(&clock);
        let sink = RecordingSink::default();
        let notes = vec![Note::new("good rotation", 42.3)];

        let url = sync.shareable_url(Some(VIDEO), &notes, &sink);
        assert!(url.starts_with("https://vodnote.test/#"));

        let decoded = url_codec::decode(url.split_once('#').unwrap().1);
        assert_eq!(decoded.notes.len(), 1);

        let bare = sync.shareable_url(None, &notes, &sink);
        assert_eq!(bare, "https://vodnote.test/");
    }

    #[test]
    fn clipboard_failure_is_reported_not_raised() {
        let clock = FakeClock::new();
        let sync = synced(&clock);
        let sink = RecordingSink::default();

        assert!(!sync.copy_shareable_url(Some(VIDEO), &[], &sink, &mut FailingClipboard));

        let mut clipboard = CapturingClipboard::default();
        assert!(sync.copy_shareable_url(Some(VIDEO), &[], &sink, &mut clipboard));
        assert!(clipboard.0.unwrap().contains("FOatagUO-Z0"));
    }

    #[tokio::test]
    async fn fragment_with_notes_is_a_shared_session() {
        let store = MemoryStore::new();
        let fragment = url_codec::encode(Some(VIDEO), &[Note::new("good rotation", 42.3)]);

        let outcome = interpret_fragment(&fragment, &store, None).await;

        match outcome {
            HashOutcome::Shared { ref video_url, ref notes } => {
                assert_eq!(video_url, VIDEO);
                assert_eq!(notes.len(), 1);
            }
            other => panic!("expected shared outcome, got {other:?}"),
        }
        assert_eq!(outcome.pending_seek(), Some(42.3));
    }

    #[tokio::test]
    async fn remembered_session_is_resumed_over_a_bare_video_link() {
        let store = MemoryStore::new();
        let session = Vodding::new(None, vec![Note::new("stored", 1.0)]);
        store.save(&session).await.unwrap();

        let fragment = url_codec::encode(Some(VIDEO), &[]);
        let outcome = interpret_fragment(&fragment, &store, Some(session.id)).await;

        assert_eq!(outcome, HashOutcome::Resume(session));
    }

    #[tokio::test]
    async fn unknown_session_falls_back_to_the_video_reference() {
        let store = MemoryStore::new();
        let fragment = url_codec::encode(Some(VIDEO), &[]);

        let outcome = interpret_fragment(&fragment, &store, Some(Uuid::new_v4())).await;

        assert_eq!(outcome, HashOutcome::Video { video_url: VIDEO.to_owned() });
    }

    #[tokio::test]
    async fn empty_fragment_is_nothing() {
        let store = MemoryStore::new();
        assert_eq!(interpret_fragment("", &store, None).await, HashOutcome::None);
    }
}
