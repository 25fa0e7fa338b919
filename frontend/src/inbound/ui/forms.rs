//! Form submissions and menu actions.
//!
//! Every handler reports its outcome through the notification centre; errors
//! are also returned so hosts can react further, but none of them is fatal.

use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;

use crate::domain::ports::ApiError;
use crate::domain::{
    AuthError, AuthService, Booking, CatalogueService, LoginCredentials, NotificationKind,
    RegistrationForm, RegistrationInput, Session,
};

use super::document::{Document, PresentationError};
use super::modal::{LOGIN_MODAL, ModalController, REGISTER_MODAL};
use super::notification::NotificationCenter;
use super::session_ui::SessionUi;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const REGISTER_SUCCESS: &str = "Registration successful!";
pub const LOGIN_TO_BOOK: &str = "Please login to make a booking";
pub const LOGIN_FOR_ASSISTANCE: &str = "Please login to request assistance";
pub const LOGIN_TO_VIEW_BOOKINGS: &str = "Please login to view bookings";
pub const NO_BOOKINGS: &str = "No bookings found";
pub const BOOKINGS_FAILED: &str = "Failed to load bookings";

/// Booking forms on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Hotel,
    Bus,
    Visa,
}

impl BookingKind {
    fn login_prompt(self) -> &'static str {
        match self {
            Self::Hotel | Self::Bus => LOGIN_TO_BOOK,
            Self::Visa => LOGIN_FOR_ASSISTANCE,
        }
    }

    fn pending_notice(self) -> &'static str {
        match self {
            Self::Hotel => "Hotel booking feature coming soon!",
            Self::Bus => "Bus booking feature coming soon!",
            Self::Visa => "Visa assistance feature coming soon!",
        }
    }
}

/// Outcome of a booking form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// No session; the login dialog was opened.
    LoginRequired,
    /// Signed in; the feature notice was shown.
    Pending,
}

/// Collaborators shared by the form handlers.
pub struct FormController {
    auth: AuthService,
    catalogue: CatalogueService,
    session_ui: Arc<SessionUi>,
    modals: Arc<ModalController>,
    notifications: Arc<NotificationCenter>,
}

impl FormController {
    pub fn new(
        auth: AuthService,
        catalogue: CatalogueService,
        session_ui: Arc<SessionUi>,
        modals: Arc<ModalController>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            auth,
            catalogue,
            session_ui,
            modals,
            notifications,
        }
    }

    fn notify(&self, document: &Document, text: &str, kind: NotificationKind) {
        self.notifications.show(text, kind);
        if let Err(err) = self.notifications.render_into(document) {
            warn!(error = %err, "notification host unavailable");
        }
    }

    fn toggle(&self, result: Result<(), PresentationError>) {
        if let Err(err) = result {
            warn!(error = %err, "modal change ignored");
        }
    }

    /// Validate and submit the login dialog.
    pub async fn submit_login(
        &self,
        document: &Document,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let outcome = match LoginCredentials::try_from_parts(email, password) {
            Ok(credentials) => self.auth.login(&credentials).await,
            Err(err) => Err(err.into()),
        };
        self.finish_auth(document, outcome, LOGIN_MODAL, LOGIN_SUCCESS)
    }

    /// Validate and submit the registration dialog.
    pub async fn submit_register(
        &self,
        document: &Document,
        input: &RegistrationInput<'_>,
    ) -> Result<Session, AuthError> {
        let outcome = match RegistrationForm::try_from_input(input) {
            Ok(form) => self.auth.register(&form).await,
            Err(err) => Err(err.into()),
        };
        self.finish_auth(document, outcome, REGISTER_MODAL, REGISTER_SUCCESS)
    }

    fn finish_auth(
        &self,
        document: &Document,
        outcome: Result<Session, AuthError>,
        modal: &str,
        success: &str,
    ) -> Result<Session, AuthError> {
        match &outcome {
            Ok(_) => {
                self.session_ui.refresh(document);
                self.toggle(self.modals.close(modal));
                self.notify(document, success, NotificationKind::Success);
            }
            Err(err) => self.notify(document, &err.user_message(), NotificationKind::Error),
        }
        outcome
    }

    /// Gate a booking form behind the session.
    pub fn submit_booking(&self, document: &Document, kind: BookingKind) -> BookingOutcome {
        if !self.session_ui.sessions().is_authenticated() {
            self.notify(document, kind.login_prompt(), NotificationKind::Error);
            self.toggle(self.modals.open(LOGIN_MODAL));
            return BookingOutcome::LoginRequired;
        }
        self.notify(document, kind.pending_notice(), NotificationKind::Info);
        BookingOutcome::Pending
    }

    /// Fetch the user's bookings and summarise them in a notification.
    ///
    /// Returns `Ok(None)` when nobody is signed in.
    pub async fn show_bookings(
        &self,
        document: &Document,
    ) -> Result<Option<Vec<Booking>>, ApiError> {
        if !self.session_ui.sessions().is_authenticated() {
            self.notify(document, LOGIN_TO_VIEW_BOOKINGS, NotificationKind::Error);
            self.toggle(self.modals.open(LOGIN_MODAL));
            return Ok(None);
        }
        match self.catalogue.bookings().await {
            Ok(bookings) if bookings.is_empty() => {
                self.notify(document, NO_BOOKINGS, NotificationKind::Info);
                Ok(Some(bookings))
            }
            Ok(bookings) => {
                let summary = format!("You have {} booking(s)", bookings.len());
                self.notify(document, &summary, NotificationKind::Info);
                Ok(Some(bookings))
            }
            Err(err) => {
                warn!(error = %err, "bookings fetch failed");
                self.notify(document, BOOKINGS_FAILED, NotificationKind::Error);
                Err(err)
            }
        }
    }

    /// The "Sign up" / "Sign in" links inside the auth dialogs.
    pub fn switch_modal(&self, from: &str, to: &str) -> Result<(), PresentationError> {
        self.modals.switch(from, to)
    }

    /// The navigation "Logout" control.
    pub fn logout(&self, document: &Document) {
        if let Err(err) = self.session_ui.logout(document) {
            warn!(error = %err, "session storage could not be cleared");
        }
    }
}

/// Link inside one auth dialog that swaps to the other.
#[component]
fn SwitchLink(
    from: &'static str,
    to: &'static str,
    prompt: &'static str,
    label: &'static str,
) -> Element {
    rsx! {
        p { class: "text-sm text-gray-600 text-center mt-4",
            "{prompt} "
            a {
                class: "text-blue-600 font-medium",
                href: "#",
                "data-switch-from": from,
                "data-switch-to": to,
                "{label}"
            }
        }
    }
}

#[component]
fn Field(
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    label: &'static str,
) -> Element {
    rsx! {
        div { class: "mb-4",
            label { class: "block text-sm font-medium text-gray-700 mb-1", r#for: id, "{label}" }
            input {
                class: "w-full px-4 py-2 border rounded-lg",
                id,
                name,
                r#type: kind,
                required: true,
            }
        }
    }
}

/// Body of the login dialog; submitted through [`FormController::submit_login`].
#[component]
pub fn LoginForm() -> Element {
    rsx! {
        h2 { class: "text-2xl font-bold mb-4", "Sign In" }
        form { id: "loginForm", method: "post",
            Field { id: "loginEmail", name: "email", kind: "email", label: "Email" }
            Field { id: "loginPassword", name: "password", kind: "password", label: "Password" }
            button { class: "btn btn-primary w-full", r#type: "submit", "Sign In" }
        }
        SwitchLink {
            from: LOGIN_MODAL,
            to: REGISTER_MODAL,
            prompt: "Don't have an account?",
            label: "Sign up",
        }
    }
}

/// Body of the registration dialog; submitted through
/// [`FormController::submit_register`].
#[component]
pub fn RegisterForm() -> Element {
    rsx! {
        h2 { class: "text-2xl font-bold mb-4", "Create Account" }
        form { id: "registerForm", method: "post",
            div { class: "grid grid-cols-2 gap-4",
                Field { id: "registerFirstName", name: "first_name", kind: "text", label: "First Name" }
                Field { id: "registerLastName", name: "last_name", kind: "text", label: "Last Name" }
            }
            Field { id: "registerEmail", name: "email", kind: "email", label: "Email" }
            Field { id: "registerPhone", name: "phone", kind: "tel", label: "Phone" }
            Field { id: "registerPassword", name: "password", kind: "password", label: "Password" }
            button { class: "btn btn-primary w-full", r#type: "submit", "Sign Up" }
        }
        SwitchLink {
            from: REGISTER_MODAL,
            to: LOGIN_MODAL,
            prompt: "Already have an account?",
            label: "Sign in",
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{FixtureTravelApi, InMemorySessionStorage, RecordingNavigator};
    use crate::domain::{BOOKINGS_PATH, LOGIN_PATH, SessionService};
    use crate::inbound::ui::document::{NAV_AUTH, NOTIFICATIONS, render_markup};
    use crate::inbound::ui::notification::DEFAULT_NOTIFICATION_TIMEOUT;
    use crate::test_support::MutableClock;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    struct Harness {
        forms: FormController,
        modals: Arc<ModalController>,
        storage: Arc<InMemorySessionStorage>,
        document: Document,
    }

    impl Harness {
        fn new(api: FixtureTravelApi) -> Self {
            let api = Arc::new(api);
            let storage = Arc::new(InMemorySessionStorage::new());
            let sessions = Arc::new(SessionService::new(storage.clone()));
            let session_ui = Arc::new(SessionUi::new(
                sessions.clone(),
                Arc::new(RecordingNavigator::new()),
            ));
            let modals = Arc::new(ModalController::with_auth_modals());
            let notifications = Arc::new(NotificationCenter::new(
                Arc::new(MutableClock::new(Utc::now())),
                DEFAULT_NOTIFICATION_TIMEOUT,
            ));
            let forms = FormController::new(
                AuthService::new(api.clone(), sessions),
                CatalogueService::new(api),
                session_ui,
                modals.clone(),
                notifications,
            );
            Self {
                forms,
                modals,
                storage,
                document: Document::home(),
            }
        }

        fn toast(&self) -> String {
            self.document
                .container(NOTIFICATIONS)
                .expect("toast host")
        }

        async fn sign_in(&self) {
            self.forms
                .submit_login(&self.document, "a@b.com", "secret1")
                .await
                .expect("login");
        }
    }

    fn login_response() -> Value {
        json!({ "data": { "token": "t1", "user": { "first_name": "A" } } })
    }

    #[tokio::test]
    async fn successful_login_persists_and_greets() {
        let harness =
            Harness::new(FixtureTravelApi::new().with_response(LOGIN_PATH, login_response()));
        harness.modals.open(LOGIN_MODAL).expect("open");

        harness.sign_in().await;

        assert_eq!(
            harness.storage.snapshot().get("authToken").map(String::as_str),
            Some("t1")
        );
        let nav = harness.document.container(NAV_AUTH).expect("nav");
        assert!(nav.contains("Welcome, A!"), "{nav}");
        assert!(!harness.modals.is_open(LOGIN_MODAL));
        assert!(harness.toast().contains(LOGIN_SUCCESS));
    }

    #[rstest]
    #[case::bad_email("not-an-email", "secret1", "Please enter a valid email address")]
    #[case::short_password("a@b.com", "123", "Password must be at least 6 characters")]
    #[tokio::test]
    async fn invalid_logins_never_reach_the_api(
        #[case] email: &str,
        #[case] password: &str,
        #[case] message: &str,
    ) {
        let harness = Harness::new(FixtureTravelApi::new());
        let err = harness
            .forms
            .submit_login(&harness.document, email, password)
            .await
            .expect_err("invalid");

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(harness.toast().contains(message));
        assert!(harness.storage.snapshot().is_empty());
    }

    #[tokio::test]
    async fn rejected_login_shows_the_backend_message() {
        let api = FixtureTravelApi::new()
            .with_error(LOGIN_PATH, ApiError::request(401_u16, "Invalid credentials"));
        let harness = Harness::new(api);

        let result = harness
            .forms
            .submit_login(&harness.document, "a@b.com", "secret1")
            .await;

        assert!(result.is_err());
        assert!(harness.toast().contains("Invalid credentials"));
    }

    #[rstest]
    #[case(BookingKind::Hotel, LOGIN_TO_BOOK)]
    #[case(BookingKind::Bus, LOGIN_TO_BOOK)]
    #[case(BookingKind::Visa, LOGIN_FOR_ASSISTANCE)]
    fn signed_out_bookings_open_the_login_dialog(#[case] kind: BookingKind, #[case] prompt: &str) {
        let harness = Harness::new(FixtureTravelApi::new());

        let outcome = harness.forms.submit_booking(&harness.document, kind);

        assert_eq!(outcome, BookingOutcome::LoginRequired);
        assert!(harness.modals.is_open(LOGIN_MODAL));
        assert!(harness.toast().contains(prompt));
    }

    #[tokio::test]
    async fn signed_in_bookings_show_the_pending_notice() {
        let harness =
            Harness::new(FixtureTravelApi::new().with_response(LOGIN_PATH, login_response()));
        harness.sign_in().await;

        let outcome = harness.forms.submit_booking(&harness.document, BookingKind::Visa);

        assert_eq!(outcome, BookingOutcome::Pending);
        assert!(harness.toast().contains("Visa assistance feature coming soon!"));
    }

    #[rstest]
    #[case::empty(json!({ "data": [] }), NO_BOOKINGS)]
    #[case::two(json!([{ "id": 1 }, { "id": 2 }]), "You have 2 booking(s)")]
    #[tokio::test]
    async fn bookings_are_summarised(#[case] body: Value, #[case] expected: &str) {
        let api = FixtureTravelApi::new()
            .with_response(LOGIN_PATH, login_response())
            .with_response(BOOKINGS_PATH, body);
        let harness = Harness::new(api);
        harness.sign_in().await;

        harness
            .forms
            .show_bookings(&harness.document)
            .await
            .expect("bookings");

        assert!(harness.toast().contains(expected));
    }

    #[tokio::test]
    async fn bookings_require_a_session() {
        let harness = Harness::new(FixtureTravelApi::new());

        let bookings = harness
            .forms
            .show_bookings(&harness.document)
            .await
            .expect("no request made");

        assert_eq!(bookings, None);
        assert!(harness.toast().contains(LOGIN_TO_VIEW_BOOKINGS));
        assert!(harness.modals.is_open(LOGIN_MODAL));
    }

    #[tokio::test]
    async fn failed_bookings_fetch_is_reported() {
        let api = FixtureTravelApi::new()
            .with_response(LOGIN_PATH, login_response())
            .with_error(BOOKINGS_PATH, ApiError::request(401_u16, "expired"));
        let harness = Harness::new(api);
        harness.sign_in().await;

        let result = harness.forms.show_bookings(&harness.document).await;

        assert!(result.is_err());
        assert!(harness.toast().contains(BOOKINGS_FAILED));
    }

    #[test]
    fn switch_links_move_between_dialogs() {
        let harness = Harness::new(FixtureTravelApi::new());
        harness.modals.open(LOGIN_MODAL).expect("open");

        harness
            .forms
            .switch_modal(LOGIN_MODAL, REGISTER_MODAL)
            .expect("switch");

        assert!(harness.modals.is_open(REGISTER_MODAL));
        assert!(!harness.modals.is_open(LOGIN_MODAL));
    }

    #[rstest]
    #[case::login(rsx! { LoginForm {} }, &["email", "password"], REGISTER_MODAL)]
    #[case::register(
        rsx! { RegisterForm {} },
        &["first_name", "last_name", "email", "phone", "password"],
        LOGIN_MODAL
    )]
    fn auth_dialogs_carry_their_fields(
        #[case] form: Element,
        #[case] fields: &[&str],
        #[case] switch_to: &str,
    ) {
        let html = render_markup(form);
        for field in fields {
            assert!(html.contains(&format!(r#"name="{field}""#)), "{field}: {html}");
        }
        assert!(html.contains(r#"type="submit""#), "{html}");
        assert!(
            html.contains(&format!(r#"data-switch-to="{switch_to}""#)),
            "{html}"
        );
    }
}
