//! Navigation auth controls bound to the session.

use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;

use crate::domain::ports::{Navigator, StorageError};
use crate::domain::{Session, SessionService, UserProfile};

use super::document::{Document, NAV_AUTH};
use super::modal::{LOGIN_MODAL, REGISTER_MODAL};

/// Where logout sends the browser.
pub const SITE_ROOT: &str = "/";
pub const ACCOUNT_HREF: &str = "/account";
pub const BOOKINGS_HREF: &str = "/bookings";

/// Swaps the `nav-auth` container between signed-in and signed-out views.
pub struct SessionUi {
    sessions: Arc<SessionService>,
    navigator: Arc<dyn Navigator>,
}

impl SessionUi {
    pub fn new(sessions: Arc<SessionService>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            sessions,
            navigator,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionService> {
        &self.sessions
    }

    /// Load the persisted session and render the matching controls.
    ///
    /// Storage failures still render the signed-out controls before being
    /// returned.
    pub fn restore(&self, document: &Document) -> Result<Option<Session>, StorageError> {
        let restored = self.sessions.restore();
        let session = restored.as_ref().ok().and_then(Option::as_ref);
        self.render_into(document, session);
        restored
    }

    /// Persist a session returned by `POST /auth/login`.
    pub fn login(&self, document: &Document, session: Session) -> Result<(), StorageError> {
        self.sessions.establish(session.clone())?;
        self.render_into(document, Some(&session));
        Ok(())
    }

    /// Persist a session returned by `POST /auth/register`.
    pub fn register(&self, document: &Document, session: Session) -> Result<(), StorageError> {
        self.login(document, session)
    }

    /// Re-render from the session already held in memory.
    pub fn refresh(&self, document: &Document) {
        self.render_into(document, self.sessions.current().as_ref());
    }

    /// Forget the session and reload the site root.
    pub fn logout(&self, document: &Document) -> Result<(), StorageError> {
        let cleared = self.sessions.clear();
        self.render_into(document, None);
        self.navigator.navigate(SITE_ROOT);
        cleared
    }

    fn render_into(&self, document: &Document, session: Option<&Session>) {
        if let Err(err) = document.replace(NAV_AUTH, render_nav(session)) {
            warn!(error = %err, "navigation container unavailable");
        }
    }
}

/// Auth controls for `session`, or sign-in buttons when there is none.
pub fn render_nav(session: Option<&Session>) -> Element {
    match session {
        Some(session) => rsx! { SignedInNav { user: session.user().clone() } },
        None => rsx! { SignedOutNav {} },
    }
}

#[component]
fn SignedInNav(user: UserProfile) -> Element {
    let welcome = user.welcome();
    let initials = user.initials();
    let full_name = user.full_name();
    let email = user.email.trim();
    rsx! {
        div { class: "user-menu relative flex items-center gap-3",
            span { class: "welcome text-gray-700 font-medium", "{welcome}" }
            div { class: "user-avatar w-10 h-10 rounded-full bg-blue-600 text-white flex items-center justify-center",
                "{initials}"
            }
            div { class: "user-dropdown absolute right-0 mt-2 w-48 bg-white rounded-lg shadow-lg",
                div { class: "user-details px-4 py-2 border-b",
                    p { class: "user-name font-semibold", "{full_name}" }
                    p { class: "user-email text-sm text-gray-500", "{email}" }
                }
                a { class: "block px-4 py-2", href: ACCOUNT_HREF, "My Account" }
                a {
                    class: "block px-4 py-2",
                    href: BOOKINGS_HREF,
                    "data-action": "show-bookings",
                    "My Bookings"
                }
                button {
                    class: "btn btn-outline w-full",
                    r#type: "button",
                    "data-action": "logout",
                    "Logout"
                }
            }
        }
    }
}

#[component]
fn SignedOutNav() -> Element {
    rsx! {
        div { class: "auth-buttons flex gap-2",
            button {
                class: "btn btn-outline",
                r#type: "button",
                "data-modal-target": LOGIN_MODAL,
                "Sign In"
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                "data-modal-target": REGISTER_MODAL,
                "Sign Up"
            }
        }
    }
}
