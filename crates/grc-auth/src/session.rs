//! # Session Idle Countdown
//!
//! An explicit, injectable state machine for session idleness:
//!
//! ```text
//! Active ──(idle past warning window)──▶ Warning ──(idle past expiry)──▶ Expired
//!    ▲                                      │
//!    └────────────(touch)──────────────────┘
//! ```
//!
//! There are no ambient timers. The periphery calls `touch(now)` on user
//! activity and `observe(now)` on its own cadence; when `observe`
//! returns `Expired` the caller tears down the principal context.
//! `Expired` is terminal — a touch after expiry does not resurrect the
//! session.

use serde::{Deserialize, Serialize};

use grc_core::Timestamp;

/// The idle state of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Activity within the warning window.
    Active,
    /// Idle past the warning window but not yet expired.
    Warning,
    /// Idle past the expiry window (terminal).
    Expired,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Active => "ACTIVE",
            Self::Warning => "WARNING",
            Self::Expired => "EXPIRED",
        })
    }
}

/// Idle thresholds, in whole seconds of inactivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindows {
    /// Inactivity after which the session enters `Warning`.
    pub warning_secs: i64,
    /// Inactivity after which the session is `Expired`.
    pub expiry_secs: i64,
}

impl Default for SessionWindows {
    fn default() -> Self {
        // 13 minutes of quiet before the warning, 15 before teardown.
        Self {
            warning_secs: 13 * 60,
            expiry_secs: 15 * 60,
        }
    }
}

/// Per-session countdown state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCountdown {
    windows: SessionWindows,
    last_activity: Timestamp,
    expired: bool,
}

impl SessionCountdown {
    /// Start a countdown with activity at `now`.
    pub fn start(windows: SessionWindows, now: Timestamp) -> Self {
        Self {
            windows,
            last_activity: now,
            expired: false,
        }
    }

    /// Record user activity. Ignored once the session has expired.
    pub fn touch(&mut self, now: Timestamp) {
        if !self.expired {
            self.last_activity = now;
        }
    }

    /// Evaluate the session state at `now`. Crossing the expiry window
    /// latches the terminal state.
    pub fn observe(&mut self, now: Timestamp) -> SessionState {
        if self.expired {
            return SessionState::Expired;
        }
        let idle = now.epoch_secs() - self.last_activity.epoch_secs();
        if idle >= self.windows.expiry_secs {
            self.expired = true;
            SessionState::Expired
        } else if idle >= self.windows.warning_secs {
            SessionState::Warning
        } else {
            SessionState::Active
        }
    }

    /// Instant of the last recorded activity.
    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(iso: &str) -> Timestamp {
        Timestamp::parse(iso).unwrap()
    }

    fn windows() -> SessionWindows {
        SessionWindows {
            warning_secs: 60,
            expiry_secs: 120,
        }
    }

    #[test]
    fn test_fresh_session_is_active() {
        let start = at("2026-03-01T10:00:00Z");
        let mut s = SessionCountdown::start(windows(), start);
        assert_eq!(s.observe(start.plus_secs(30)), SessionState::Active);
    }

    #[test]
    fn test_idle_crosses_warning() {
        let start = at("2026-03-01T10:00:00Z");
        let mut s = SessionCountdown::start(windows(), start);
        assert_eq!(s.observe(start.plus_secs(60)), SessionState::Warning);
        assert_eq!(s.observe(start.plus_secs(119)), SessionState::Warning);
    }

    #[test]
    fn test_idle_crosses_expiry() {
        let start = at("2026-03-01T10:00:00Z");
        let mut s = SessionCountdown::start(windows(), start);
        assert_eq!(s.observe(start.plus_secs(120)), SessionState::Expired);
    }

    #[test]
    fn test_touch_resets_countdown() {
        let start = at("2026-03-01T10:00:00Z");
        let mut s = SessionCountdown::start(windows(), start);
        assert_eq!(s.observe(start.plus_secs(90)), SessionState::Warning);
        s.touch(start.plus_secs(90));
        assert_eq!(s.observe(start.plus_secs(100)), SessionState::Active);
    }

    #[test]
    fn test_expired_is_terminal() {
        let start = at("2026-03-01T10:00:00Z");
        let mut s = SessionCountdown::start(windows(), start);
        assert_eq!(s.observe(start.plus_secs(300)), SessionState::Expired);
        // A late touch does not resurrect the session.
        s.touch(start.plus_secs(301));
        assert_eq!(s.observe(start.plus_secs(302)), SessionState::Expired);
    }

    #[test]
    fn test_default_windows_order() {
        let w = SessionWindows::default();
        assert!(w.warning_secs < w.expiry_secs);
    }
}
