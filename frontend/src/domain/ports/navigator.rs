//! Driven port for page navigation.
//!
//! Logging out reloads the site root; dedicated pages (hotels, flights, ...)
//! are plain links. The port lets the UI request a navigation without
//! touching a browser global.

use std::sync::Mutex;

/// Performs full-page navigations.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `href`, reloading the page.
    fn navigate(&self, href: &str);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `href` requested so far.
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, href: &str) {
        tracing::debug!(href, "navigation requested");
        self.visited
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(href.to_owned());
    }
}
