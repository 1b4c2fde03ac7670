//! The `alert-view` status banner.
//!
//! A message appears `show_delay` after it is announced and disappears at
//! `hide_delay`, both measured from the announcement.

use std::time::{Duration, Instant};

pub const USER_ADDED: &str = "User added successfully.";
pub const USER_UPDATED: &str = "User updated successfully.";
pub const USER_DELETED: &str = "User deleted successfully.";

pub const DEFAULT_SHOW_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Announcement {
    message: String,
    posted_at: Instant,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    show_delay: Duration,
    hide_delay: Duration,
    current: Option<Announcement>,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new(DEFAULT_SHOW_DELAY, DEFAULT_HIDE_DELAY)
    }
}

impl StatusBanner {
    pub fn new(show_delay: Duration, hide_delay: Duration) -> Self {
        Self {
            show_delay,
            hide_delay: hide_delay.max(show_delay),
            current: None,
        }
    }

    pub fn show_delay(&self) -> Duration {
        self.show_delay
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    /// Replaces any earlier announcement.
    pub fn announce(&mut self, message: &str, at: Instant) {
        self.current = Some(Announcement {
            message: message.to_string(),
            posted_at: at,
        });
    }

    /// Latest announced message regardless of timing.
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.message.as_str())
    }

    pub fn visible_at(&self, now: Instant) -> Option<&str> {
        let announcement = self.current.as_ref()?;
        let elapsed = now.saturating_duration_since(announcement.posted_at);
        if elapsed >= self.show_delay && elapsed < self.hide_delay {
            Some(announcement.message.as_str())
        } else {
            None
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_visible_only_inside_its_window() {
        let mut banner = StatusBanner::default();
        let posted = Instant::now();
        banner.announce(USER_ADDED, posted);

        assert_eq!(banner.visible_at(posted), None);
        assert_eq!(banner.visible_at(posted + Duration::from_millis(99)), None);
        assert_eq!(banner.visible_at(posted + Duration::from_millis(100)), Some(USER_ADDED));
        assert_eq!(banner.visible_at(posted + Duration::from_millis(3999)), Some(USER_ADDED));
        assert_eq!(banner.visible_at(posted + Duration::from_millis(4000)), None);
        assert_eq!(banner.message(), Some(USER_ADDED));
    }

    #[test]
    fn later_announcement_supersedes() {
        let mut banner = StatusBanner::new(Duration::ZERO, Duration::from_secs(1));
        let posted = Instant::now();
        banner.announce(USER_ADDED, posted);
        banner.announce(USER_DELETED, posted);

        assert_eq!(banner.visible_at(posted), Some(USER_DELETED));
        banner.dismiss();
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn hide_delay_never_precedes_show_delay() {
        let banner = StatusBanner::new(Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(banner.hide_delay(), Duration::from_secs(2));
    }
}
