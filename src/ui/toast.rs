// LogPane - ui/toast.rs
//
// Transient notification shown after copy / custom actions. Pure timing
// state; the console view decides where to draw it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    message: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self::shown_at(message, ttl, Instant::now())
    }

    pub fn shown_at(message: impl Into<String>, ttl: Duration, shown_at: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at,
            ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True once the full time-to-live has elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }

    /// Time left on screen; zero once expired.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.ttl
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
