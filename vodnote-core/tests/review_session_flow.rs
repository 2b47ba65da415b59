//! End-to-end review flow: paste a link, take a note mid-playback,
//! autosave the session, share it, and reopen the shared link.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use vodnote_core::prelude::*;

#[derive(Debug)]
struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
        })
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

/// Player paused at a fixed position, shaped like a raw media element.
struct PausedAt(f64);

impl MediaElement for PausedAt {
    fn current_time(&self) -> f64 {
        self.0
    }
    fn set_current_time(&self, _seconds: f64) -> Result<(), PlayerError> {
        Ok(())
    }
    fn duration(&self) -> f64 {
        3600.0
    }
    fn volume(&self) -> f64 {
        1.0
    }
    fn set_volume(&self, _volume: f64) -> Result<(), PlayerError> {
        Ok(())
    }
    fn paused(&self) -> bool {
        true
    }
    fn play(&self) -> Result<(), PlayerError> {
        Ok(())
    }
    fn pause(&self) -> Result<(), PlayerError> {
        Ok(())
    }
}

struct NativeHandle(PausedAt);

impl PlayerHandle for NativeHandle {
    fn media(&self) -> Option<&dyn MediaElement> {
        Some(&self.0)
    }
}

#[derive(Debug, Default)]
struct FakeLocation {
    fragment: String,
}

impl LocationSink for FakeLocation {
    fn write_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_owned();
    }
    fn base_url(&self) -> String {
        "https://vodnote.test/".to_owned()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn review_share_and_reopen() {
    init_tracing();
    let settings = SyncSettings::default();
    let clock = ManualClock::new();
    let store = Arc::new(MemoryStore::new());

    // Paste the link.
    let canonical = normalize("https://youtu.be/FOatagUO-Z0").expect("valid VOD link");
    assert_eq!(canonical, "https://www.youtube.com/watch?v=FOatagUO-Z0");
    let video = Video::new(canonical.clone(), "Untitled");

    // Player mounted and parked at 42.3s.
    let adapter = Arc::new(PlayerAdapter::attached(Arc::new(NativeHandle(PausedAt(42.3)))));

    // Take the note at the playhead.
    let mut notes = NotesController::new();
    notes.set_time_source(adapter.clone());
    notes.add_note("good rotation").expect("non-blank note");
    assert!((notes.notes()[0].timestamp - 42.3).abs() < 1e-9);

    // Autosave settles into exactly one record with the note.
    let mut autosave = SessionAutosave::with_clock(
        store.clone(),
        settings.autosave_debounce(),
        clock.clone() as Arc<dyn Clock>,
    );
    autosave.observe(Some(&video), notes.notes());
    clock.advance(settings.autosave_debounce());
    autosave.tick().await;

    let saved = store.list_all().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].notes.len(), 1);
    assert!((saved[0].notes[0].timestamp - 42.3).abs() < 1e-9);

    // Share the session.
    let mut sync = UrlSynchronizer::with_clock(settings.url_debounce(), clock.clone() as Arc<dyn Clock>);
    let location = FakeLocation::default();
    let link = sync.shareable_url(Some(&video.url), notes.notes(), &location);

    // Reopen it: one note, same content, flagged shared, deep-linked
    // to its moment.
    let fragment = link.split_once('#').expect("fragment present").1;
    let outcome = interpret_fragment(fragment, store.as_ref(), None).await;
    let HashOutcome::Shared { video_url, notes: shared_notes } = outcome.clone() else {
        panic!("expected a shared session, got {outcome:?}");
    };
    assert_eq!(video_url, video.url);
    assert_eq!(shared_notes.len(), 1);
    assert_eq!(shared_notes[0].content, "good rotation");
    assert!((outcome.pending_seek().unwrap() - 42.3).abs() < 1e-9);

    // The recipient claims it; local sync takes over.
    let mut recipient_location = FakeLocation::default();
    let mut recipient_sync =
        UrlSynchronizer::with_clock(settings.url_debounce(), clock.clone() as Arc<dyn Clock>);
    recipient_sync.set_shared(true);
    recipient_sync.on_change(Some(&video_url), &shared_notes, &mut recipient_location);
    assert!(recipient_location.fragment.is_empty(), "shared sessions never write back");

    let mut recipient_autosave = SessionAutosave::with_clock(
        store.clone(),
        settings.autosave_debounce(),
        clock.clone() as Arc<dyn Clock>,
    );
    let claimed = recipient_autosave
        .claim_shared(Some(Video::new(video_url.clone(), "Untitled")), &shared_notes)
        .await
        .expect("claim persists");
    recipient_sync.claim(Some(&video_url), &shared_notes, &mut recipient_location);

    assert!(!recipient_sync.shared());
    assert!(recipient_location.fragment.contains("FOatagUO-Z0"));
    assert_eq!(store.load_by_id(claimed.id).await.unwrap().unwrap().notes.len(), 1);
}

#[tokio::test]
async fn timestamp_round_trips_through_the_link_exactly() {
    let note = Note::new("good rotation", 42.3);
    let fragment = encode(Some("https://www.youtube.com/watch?v=FOatagUO-Z0"), &[note]);

    let state = decode(&fragment);

    assert_eq!(state.notes[0].timestamp, 42.3);
    assert_eq!(state.notes[0].content, "good rotation");
    assert!(state.shared);
}
