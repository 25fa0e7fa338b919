//! Home page composition.
//!
//! [`HomeApp`] bundles every component behind the page's containers. It
//! depends on ports only; adapters are chosen by the caller.

use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use futures_util::future::join;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{Navigator, TravelApi};
use crate::domain::{
    AuthService, CatalogueService, DestinationRecord, ServiceRecord, SessionService,
};

use super::document::{DESTINATIONS, Document, SERVICE_TYPES, render_markup};
use super::forms::{FormController, LoginForm, RegisterForm};
use super::item::{DestinationCard, ServiceTypeCard};
use super::list_page::{ListSection, ListState};
use super::modal::{LOGIN_MODAL, ModalController, REGISTER_MODAL};
use super::notification::NotificationCenter;
use super::session_ui::SessionUi;

/// The two catalogue lists on the home page.
pub struct HomePage {
    catalogue: CatalogueService,
    services: ListSection<ServiceRecord>,
    destinations: ListSection<DestinationRecord>,
}

impl HomePage {
    pub fn new(catalogue: CatalogueService) -> Self {
        Self {
            catalogue,
            services: ListSection::new(SERVICE_TYPES, "services", ServiceTypeCard),
            destinations: ListSection::new(DESTINATIONS, "destinations", DestinationCard),
        }
    }

    /// Fetch and render both lists concurrently.
    ///
    /// Returns the final `(services, destinations)` states.
    pub async fn render(&self, document: &Document) -> (ListState, ListState) {
        join(
            self.services
                .populate(document, self.catalogue.service_types()),
            self.destinations
                .populate(document, self.catalogue.destinations()),
        )
        .await
    }
}

/// Ports and settings the home page is assembled from.
pub struct HomeDependencies {
    pub api: Arc<dyn TravelApi>,
    pub sessions: Arc<SessionService>,
    pub navigator: Arc<dyn Navigator>,
    pub clock: Arc<dyn Clock>,
    pub notification_timeout: Duration,
}

/// Every component of the home page, sharing one [`Document`].
pub struct HomeApp {
    document: Document,
    page: HomePage,
    session_ui: Arc<SessionUi>,
    modals: Arc<ModalController>,
    notifications: Arc<NotificationCenter>,
    forms: FormController,
}

impl HomeApp {
    pub fn new(deps: HomeDependencies) -> Self {
        let catalogue = CatalogueService::new(deps.api.clone());
        let session_ui = Arc::new(SessionUi::new(deps.sessions.clone(), deps.navigator));
        let modals = Arc::new(ModalController::with_auth_modals());
        let notifications = Arc::new(NotificationCenter::new(
            deps.clock,
            deps.notification_timeout,
        ));
        let forms = FormController::new(
            AuthService::new(deps.api, deps.sessions),
            catalogue.clone(),
            session_ui.clone(),
            modals.clone(),
            notifications.clone(),
        );
        Self {
            document: Document::home(),
            page: HomePage::new(catalogue),
            session_ui,
            modals,
            notifications,
            forms,
        }
    }

    /// Restore the session, then render both lists.
    ///
    /// Nothing here is fatal: storage failures fall back to the signed-out
    /// navigation and fetch failures become error panels.
    pub async fn load(&self) -> (ListState, ListState) {
        match self.session_ui.restore(&self.document) {
            Ok(Some(_)) => info!("page loaded with a signed-in session"),
            Ok(None) => info!("page loaded signed out"),
            Err(err) => warn!(error = %err, "session restore failed; continuing signed out"),
        }
        self.page.render(&self.document).await
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn forms(&self) -> &FormController {
        &self.forms
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn session_ui(&self) -> &SessionUi {
        &self.session_ui
    }

    /// Page body: containers followed by the auth dialogs.
    pub fn to_html(&self) -> String {
        let mut html = self.document.to_html();
        let dialogs = [
            (LOGIN_MODAL, rsx! { LoginForm {} }),
            (REGISTER_MODAL, rsx! { RegisterForm {} }),
        ];
        for (id, content) in dialogs {
            match self.modals.render(id, content) {
                Ok(modal) => {
                    html.push('\n');
                    html.push_str(&render_markup(modal));
                }
                Err(err) => warn!(error = %err, "modal skipped"),
            }
        }
        html
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        ApiError, FixtureTravelApi, InMemorySessionStorage, RecordingNavigator,
    };
    use crate::domain::{DESTINATIONS_PATH, SERVICE_TYPES_PATH};
    use crate::inbound::ui::document::NAV_AUTH;
    use crate::test_support::MutableClock;
    use chrono::Utc;
    use serde_json::json;

    fn app(api: FixtureTravelApi) -> HomeApp {
        HomeApp::new(HomeDependencies {
            api: Arc::new(api),
            sessions: Arc::new(SessionService::new(Arc::new(InMemorySessionStorage::new()))),
            navigator: Arc::new(RecordingNavigator::new()),
            clock: Arc::new(MutableClock::new(Utc::now())),
            notification_timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn load_renders_nav_and_both_lists() {
        let api = FixtureTravelApi::new()
            .with_response(SERVICE_TYPES_PATH, json!({ "data": [{ "name": "Hotels" }] }))
            .with_response(DESTINATIONS_PATH, json!([{ "name": "Bali" }, { "name": "Rome" }]));
        let app = app(api);

        let (services, destinations) = app.load().await;

        assert_eq!(services, ListState::Populated { count: 1 });
        assert_eq!(destinations, ListState::Populated { count: 2 });
        let nav = app.document().container(NAV_AUTH).expect("nav");
        assert!(nav.contains("Sign In"), "{nav}");
        let html = app.to_html();
        assert!(html.contains(r#"id="loginModal""#), "{html}");
        assert!(html.contains("Rome"), "{html}");
    }

    #[test]
    fn auth_dialogs_render_usable_forms() {
        let html = app(FixtureTravelApi::new()).to_html();

        assert!(html.contains(r#"id="loginForm""#), "{html}");
        assert!(html.contains(r#"id="registerForm""#), "{html}");
        for field in ["email", "password", "first_name", "last_name", "phone"] {
            assert!(html.contains(&format!(r#"name="{field}""#)), "{field}: {html}");
        }
        assert_eq!(html.matches(r#"aria-hidden="true""#).count(), 2, "{html}");
    }

    #[tokio::test]
    async fn one_failing_list_leaves_the_other_intact() {
        let api = FixtureTravelApi::new()
            .with_response(SERVICE_TYPES_PATH, json!([{ "name": "Flights" }]))
            .with_error(DESTINATIONS_PATH, ApiError::transport("connection refused"));
        let app = app(api);

        let (services, destinations) = app.load().await;

        assert_eq!(services, ListState::Populated { count: 1 });
        assert!(matches!(destinations, ListState::Failed { .. }));
    }
}
