//! Single-slot toast notifications.
//!
//! A new message replaces the visible one. Expiry is evaluated against the
//! injected clock whenever the centre is read, so no timer task is needed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dioxus::prelude::*;
use mockable::Clock;
use tracing::debug;

use crate::domain::{NotificationId, NotificationKind, NotificationMessage};

use super::document::{Document, NOTIFICATIONS, PresentationError};

/// Lifetime applied when none is configured.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Owner of the visible notification.
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    timeout: Duration,
    next_id: AtomicU64,
    current: Mutex<Option<NotificationMessage>>,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            clock,
            timeout,
            next_id: AtomicU64::new(1),
            current: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<NotificationMessage>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace any visible notification with `text`.
    pub fn show(&self, text: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let lifetime = chrono::Duration::from_std(self.timeout)
            .unwrap_or_else(|_| chrono::Duration::milliseconds(i64::MAX / 1_000_000));
        let message = NotificationMessage::new(id, text, kind, self.clock.utc(), lifetime);
        debug!(id = id.get(), kind = %kind, "notification shown");
        *self.lock() = Some(message);
        id
    }

    /// Remove notification `id` early. Stale ids are ignored.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut current = self.lock();
        if current.as_ref().is_some_and(|message| message.id() == id) {
            *current = None;
            true
        } else {
            false
        }
    }

    /// The live notification, dropping it first if it has expired.
    pub fn current(&self) -> Option<NotificationMessage> {
        let now = self.clock.utc();
        let mut current = self.lock();
        if current.as_ref().is_some_and(|message| message.is_expired_at(now)) {
            *current = None;
        }
        current.clone()
    }

    /// Toast markup for the live notification.
    pub fn render(&self) -> Option<Element> {
        self.current().map(|message| rsx! { Toast { message } })
    }

    /// Write the live notification, or nothing, into the toast host.
    pub fn render_into(&self, document: &Document) -> Result<(), PresentationError> {
        match self.render() {
            Some(toast) => document.replace(NOTIFICATIONS, toast),
            None => document.clear(NOTIFICATIONS),
        }
    }
}

#[component]
fn Toast(message: NotificationMessage) -> Element {
    let suffix = message.kind().css_suffix();
    let id = message.id().get();
    let text = message.text();
    rsx! {
        div {
            class: "notification notification-{suffix}",
            id: "notification-{id}",
            role: "status",
            span { "{text}" }
            button {
                r#type: "button",
                "aria-label": "Dismiss",
                "data-action": "dismiss",
                "data-notification-id": "{id}",
                "\u{d7}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::ui::document::render_markup;
    use crate::test_support::MutableClock;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid start");
        Arc::new(MutableClock::new(start))
    }

    fn center(clock: &Arc<MutableClock>) -> NotificationCenter {
        NotificationCenter::new(clock.clone(), DEFAULT_NOTIFICATION_TIMEOUT)
    }

    #[rstest]
    fn second_message_replaces_the_first(clock: Arc<MutableClock>) {
        let center = center(&clock);
        let document = Document::home();

        let first = center.show("first", NotificationKind::Info);
        center.render_into(&document).expect("render");
        center.show("second", NotificationKind::Error);
        center.render_into(&document).expect("render");

        let host = document.container(NOTIFICATIONS).expect("host");
        assert_eq!(host.matches(r#"class="notification "#).count(), 1, "{host}");
        assert!(host.contains("notification-error"), "{host}");
        assert!(host.contains("second"), "{host}");
        assert!(!host.contains("first"), "{host}");
        assert!(!center.dismiss(first));
    }

    #[rstest]
    fn messages_expire_after_the_timeout(clock: Arc<MutableClock>) {
        let center = center(&clock);
        let document = Document::home();
        center.show("saved", NotificationKind::Success);

        clock.advance(Duration::from_millis(4999));
        assert!(center.current().is_some());

        clock.advance(Duration::from_millis(1));
        assert!(center.current().is_none());
        assert!(center.render().is_none());
        center.render_into(&document).expect("render");
        assert_eq!(document.container(NOTIFICATIONS).as_deref(), Some(""));
    }

    #[rstest]
    fn dismiss_removes_the_live_message(clock: Arc<MutableClock>) {
        let center = center(&clock);
        let id = center.show("hello", NotificationKind::Info);

        assert!(center.dismiss(id));
        assert!(center.current().is_none());
        assert!(!center.dismiss(id));
    }

    #[rstest]
    fn huge_timeouts_keep_the_message_alive(clock: Arc<MutableClock>) {
        let center = NotificationCenter::new(
            clock.clone(),
            Duration::from_millis(10_000_000_000_000_000),
        );
        center.show("hi", NotificationKind::Info);

        clock.advance(Duration::from_secs(86_400 * 365));
        assert!(center.current().is_some());
    }

    #[rstest]
    fn toast_markup_carries_kind_and_dismiss_control(clock: Arc<MutableClock>) {
        let center = center(&clock);
        let id = center.show("Login successful!", NotificationKind::Success);

        let toast = center.render().map(render_markup).expect("toast");
        assert!(
            toast.contains(r#"class="notification notification-success""#),
            "{toast}"
        );
        assert!(toast.contains(r#"role="status""#), "{toast}");
        assert!(
            toast.contains(&format!(r#"data-notification-id="{}""#, id.get())),
            "{toast}"
        );
        assert!(toast.contains(r#"data-action="dismiss""#), "{toast}");
        assert!(toast.contains("Login successful!"), "{toast}");
    }
}
