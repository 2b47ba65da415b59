//! Write-coalescing state shared by the synchronized channels.
//!
//! Both the URL writer and the session autosave follow the same policy:
//! bursts of low-priority changes collapse into a single write after a
//! quiet period, while a high-priority change flushes immediately. The
//! state machine is driven by change events and [`Channel::due`] checks
//! against an injected [`Clock`], so tests never need real timers.

use std::time::Instant;

/// Time source for debounce deadlines.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// State of one synchronized channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Nothing to write.
    Idle,
    /// A coalesced write is scheduled for the deadline.
    PendingWrite(Instant),
    /// A write is in flight; re-entrant writes are suppressed.
    Writing,
}

impl Channel {
    /// Whether a pending write's quiet period has elapsed.
    pub fn due(&self, now: Instant) -> bool {
        matches!(self, Channel::PendingWrite(deadline) if now >= *deadline)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Channel::PendingWrite(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pending_write_is_due_only_after_deadline() {
        let start = Instant::now();
        let channel = Channel::PendingWrite(start + Duration::from_millis(500));

        assert!(!channel.due(start));
        assert!(!channel.due(start + Duration::from_millis(499)));
        assert!(channel.due(start + Duration::from_millis(500)));
    }

    #[test]
    fn idle_and_writing_are_never_due() {
        let now = Instant::now();
        assert!(!Channel::Idle.due(now));
        assert!(!Channel::Writing.due(now));
    }
}
