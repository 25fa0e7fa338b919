//! Toast notification values.

use std::fmt;

use chrono::{DateTime, Utc};

/// Visual flavour of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// Suffix of the `notification-<kind>` class.
    pub const fn css_suffix(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_suffix())
    }
}

/// Monotonic identifier handed out by the notification centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Wrap a raw sequence number.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw sequence number, used as the DOM id suffix.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One transient message.
///
/// ## Invariants
/// - `expires_at` is strictly after `shown_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    id: NotificationId,
    text: String,
    kind: NotificationKind,
    shown_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl NotificationMessage {
    /// Build a message shown at `shown_at` that lives for `lifetime`.
    ///
    /// Non-positive lifetimes are clamped to one millisecond. Lifetimes that
    /// run past the last representable instant expire at that instant.
    pub fn new(
        id: NotificationId,
        text: impl Into<String>,
        kind: NotificationKind,
        shown_at: DateTime<Utc>,
        lifetime: chrono::Duration,
    ) -> Self {
        let lifetime = lifetime.max(chrono::Duration::milliseconds(1));
        Self {
            id,
            text: text.into(),
            kind,
            shown_at,
            expires_at: shown_at
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn shown_at(&self) -> DateTime<Utc> {
        self.shown_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the message has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
