use std::sync::{Arc, Mutex};

use tracing::warn;

use super::handle::{MediaElement, PlayerHandle, RemoteControls};
use super::probe::{PlayerShape, probe};

/// Playing state code used by provider remote APIs.
const REMOTE_STATE_PLAYING: i32 = 1;

/// Uniform control surface over whatever player handle is mounted.
///
/// Exactly one handle is live per mounted player. After [`detach`],
/// every operation is a no-op; backend errors are logged and swallowed
/// so a misbehaving third-party player cannot crash the host.
///
/// [`detach`]: PlayerAdapter::detach
pub struct PlayerAdapter {
    handle: Mutex<Option<Arc<dyn PlayerHandle>>>,
}

impl std::fmt::Debug for PlayerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attached = self.handle.lock().map(|h| h.is_some()).unwrap_or(false);
        f.debug_struct("PlayerAdapter").field("attached", &attached).finish()
    }
}

impl Default for PlayerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAdapter {
    /// A detached adapter; every operation no-ops until a handle mounts.
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    pub fn attached(handle: Arc<dyn PlayerHandle>) -> Self {
        Self {
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Mount a handle, replacing any previous one.
    pub fn attach(&self, handle: Arc<dyn PlayerHandle>) {
        if let Ok(mut slot) = self.handle.lock() {
            *slot = Some(handle);
        }
    }

    /// Unmount. Later calls degrade to no-ops, never panics.
    pub fn detach(&self) {
        if let Ok(mut slot) = self.handle.lock() {
            *slot = None;
        }
    }

    fn with_shape<R>(&self, op: impl FnOnce(PlayerShape<'_>) -> Option<R>) -> Option<R> {
        let guard = self.handle.lock().ok()?;
        let handle = guard.as_ref()?;
        op(probe(handle.as_ref()))
    }

    /// Jump to an absolute position.
    ///
    /// Clamped to `[0, duration]` only when duration is locally
    /// knowable (the native path); remote players own their bounds.
    /// After a remote seek, a paused co-resident media element is
    /// resumed so a jump-and-watch never lands on a frozen frame.
    pub fn seek(&self, seconds: f64) {
        self.with_shape(|shape| {
            match shape {
                PlayerShape::Remote { api, media } => {
                    if let Err(err) = api.seek_to(seconds) {
                        warn!(error = %err, "remote seek failed");
                    }
                    if let Some(media) = media
                        && media.paused()
                        && let Err(err) = media.play()
                    {
                        warn!(error = %err, "resume after seek failed");
                    }
                }
                PlayerShape::Native(media) => {
                    let clamped = seconds.clamp(0.0, known_duration(media));
                    if let Err(err) = media.set_current_time(clamped) {
                        warn!(error = %err, "native seek failed");
                    }
                }
                PlayerShape::Unknown => {}
            }
            Some(())
        });
    }

    /// Flip between playing and paused, whichever shape is mounted.
    pub fn toggle_play(&self) {
        self.with_shape(|shape| {
            match shape {
                PlayerShape::Native(media) => {
                    let result = if media.paused() { media.play() } else { media.pause() };
                    if let Err(err) = result {
                        warn!(error = %err, "toggle play failed");
                    }
                }
                PlayerShape::Remote { api, .. } => match api.player_state() {
                    Ok(REMOTE_STATE_PLAYING) => {
                        if let Err(err) = api.pause_video() {
                            warn!(error = %err, "remote pause failed");
                        }
                    }
                    Ok(_) => {
                        if let Err(err) = api.play_video() {
                            warn!(error = %err, "remote play failed");
                        }
                    }
                    Err(err) => warn!(error = %err, "remote state query failed"),
                },
                PlayerShape::Unknown => {}
            }
            Some(())
        });
    }

    /// Nudge the position by a signed delta, clamped to `[0, duration]`
    /// with an unbounded sentinel when duration is unknown.
    pub fn seek_by(&self, delta: f64) {
        self.with_shape(|shape| {
            match shape {
                PlayerShape::Native(media) => {
                    let current = finite_or(media.current_time(), 0.0);
                    let target = (current + delta).clamp(0.0, known_duration(media));
                    if let Err(err) = media.set_current_time(target) {
                        warn!(error = %err, "relative seek failed");
                    }
                }
                PlayerShape::Remote { api, media } => {
                    let current = api
                        .current_time()
                        .or_else(|| media.map(|m| m.current_time()))
                        .map(|t| finite_or(t, 0.0))
                        .unwrap_or(0.0);
                    let duration = api
                        .duration()
                        .filter(|d| d.is_finite())
                        .unwrap_or(f64::INFINITY);
                    let target = (current + delta).clamp(0.0, duration);
                    if let Err(err) = api.seek_to(target) {
                        warn!(error = %err, "remote relative seek failed");
                    }
                }
                PlayerShape::Unknown => {}
            }
            Some(())
        });
    }

    /// Nudge the volume by a signed delta, clamped to `[0, 1]` with `1`
    /// as the sentinel when the current volume is unknown.
    pub fn adjust_volume(&self, delta: f64) {
        self.with_shape(|shape| {
            match shape {
                PlayerShape::Native(media) => {
                    let current = finite_or(media.volume(), 1.0);
                    if let Err(err) = media.set_volume((current + delta).clamp(0.0, 1.0)) {
                        warn!(error = %err, "volume change failed");
                    }
                }
                PlayerShape::Remote { api, .. } => {
                    // Provider APIs speak a 0-100 volume scale.
                    let current = api.volume().map(|v| v / 100.0).unwrap_or(1.0);
                    let target = ((current + delta).clamp(0.0, 1.0) * 100.0).round();
                    if let Err(err) = api.set_volume(target) {
                        warn!(error = %err, "remote volume change failed");
                    }
                }
                PlayerShape::Unknown => {}
            }
            Some(())
        });
    }

    /// Current playback position in seconds, if any shape can report it.
    pub fn current_time(&self) -> Option<f64> {
        self.with_shape(|shape| match shape {
            PlayerShape::Native(media) => Some(media.current_time()),
            PlayerShape::Remote { api, media } => {
                api.current_time().or_else(|| media.map(|m| m.current_time()))
            }
            PlayerShape::Unknown => None,
        })
    }

    /// Total duration in seconds, if knowable.
    pub fn duration(&self) -> Option<f64> {
        self.with_shape(|shape| match shape {
            PlayerShape::Native(media) => Some(media.duration()).filter(|d| d.is_finite()),
            PlayerShape::Remote { api, media } => api
                .duration()
                .or_else(|| media.map(|m| m.duration()))
                .filter(|d| d.is_finite()),
            PlayerShape::Unknown => None,
        })
    }
}

fn known_duration(media: &dyn MediaElement) -> f64 {
    finite_or(media.duration(), f64::INFINITY)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
