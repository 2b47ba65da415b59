use thiserror::Error;

/// Error surfaced by a misbehaving player backend.
///
/// Adapter operations log and swallow these; they never cross into the
/// host page.
#[derive(Debug, Clone, Error)]
pub enum PlayerError {
    #[error("player backend error: {0}")]
    Backend(String),
}

/// Remote-control surface of a wrapped provider player.
///
/// Volume follows the provider convention of a 0-100 scale, and player
/// state code `1` means "playing". Position and duration queries are
/// optional capabilities; absent ones report `None`.
pub trait RemoteControls {
    fn seek_to(&self, seconds: f64) -> Result<(), PlayerError>;
    fn play_video(&self) -> Result<(), PlayerError>;
    fn pause_video(&self) -> Result<(), PlayerError>;
    fn player_state(&self) -> Result<i32, PlayerError>;

    fn current_time(&self) -> Option<f64> {
        None
    }
    fn duration(&self) -> Option<f64> {
        None
    }
    fn volume(&self) -> Option<f64> {
        None
    }
    fn set_volume(&self, _volume: f64) -> Result<(), PlayerError> {
        Ok(())
    }
}

/// A handle behaving like a native media element.
///
/// `duration` may report NaN or infinity while metadata is unknown;
/// callers treat non-finite values as "unbounded".
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64) -> Result<(), PlayerError>;
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64) -> Result<(), PlayerError>;
    fn paused(&self) -> bool;
    fn play(&self) -> Result<(), PlayerError>;
    fn pause(&self) -> Result<(), PlayerError>;
}

/// A player handle of unknown shape.
///
/// Capabilities are reported through the accessors below and probed at
/// call time in precedence order: remote API first, then native media
/// element, then one level of `internal_player` indirection.
pub trait PlayerHandle: Send + Sync {
    /// Nested remote-control object, if the backend wraps one.
    fn remote(&self) -> Option<&dyn RemoteControls> {
        None
    }

    /// The handle itself acting as a native media element.
    fn media(&self) -> Option<&dyn MediaElement> {
        None
    }

    /// Accessor to an inner player, re-probed with the same rules.
    fn internal_player(&self) -> Option<&dyn PlayerHandle> {
        None
    }
}
