//! Visibility state machine for the floating "current date" badge.
//!
//! The badge shows the date of the topmost visible message while the user
//! scrolls, and hides [`HIDE_DELAY`] after scrolling stops. A new scroll
//! before the delay elapses cancels the pending hide.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, OneShotTimer, SystemClock};
use crate::date_format::format_badge_date;

/// How long the badge lingers after the last scroll motion.
pub const HIDE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BadgeState {
    Hidden,
    Visible(String),
}

pub struct DateBadge<C: Clock = SystemClock> {
    clock: C,
    state: BadgeState,
    /// Label from the most recent topmost-message change.
    label: String,
    scrolling: bool,
    hide_timer: OneShotTimer,
}

impl DateBadge<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DateBadge<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DateBadge<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: BadgeState::Hidden,
            label: String::new(),
            scrolling: false,
            hide_timer: OneShotTimer::new(),
        }
    }

    /// The topmost visible message changed.
    pub fn on_topmost_changed(&mut self, created_at: &DateTime<Utc>) {
        self.label = format_badge_date(created_at);
        if self.is_visible() {
            tracing::trace!(label = %self.label, "date badge label refreshed");
            self.state = BadgeState::Visible(self.label.clone());
        }
    }

    /// No message is visible any more (the conversation was emptied).
    pub fn clear_label(&mut self) {
        self.label.clear();
        if self.is_visible() {
            self.state = BadgeState::Visible(String::new());
        }
    }

    /// Scroll began, or the user is actively dragging.
    pub fn on_scroll_start(&mut self) {
        self.hide_timer.cancel();
        self.scrolling = true;
        if !self.is_visible() {
            tracing::trace!(label = %self.label, "date badge shown");
        }
        self.state = BadgeState::Visible(self.label.clone());
    }

    /// Scroll (or momentum) ended; hide after [`HIDE_DELAY`].
    pub fn on_scroll_end(&mut self) {
        self.scrolling = false;
        self.hide_timer.schedule(self.clock.now(), HIDE_DELAY);
    }

    /// Poll the hide timer. Returns true if the badge just hid.
    pub fn tick(&mut self) -> bool {
        if self.hide_timer.fire_if_due(self.clock.now()) && !self.scrolling {
            tracing::trace!("date badge hidden");
            self.state = BadgeState::Hidden;
            return true;
        }
        false
    }

    pub fn state(&self) -> &BadgeState {
        &self.state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, BadgeState::Visible(_))
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Time until a pending hide fires.
    pub fn time_until_hide(&self) -> Option<Duration> {
        self.hide_timer.remaining(self.clock.now())
    }
}
