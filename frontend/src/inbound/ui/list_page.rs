//! List sections: loading placeholder, fetch, then cards or an error panel.
//!
//! Each section owns one container and one renderer. [`ListSection::populate`]
//! drives `Loading -> Populated | Failed` for its container; callers run
//! several sections concurrently and each settles independently. There is no
//! cancellation, so overlapping runs leave whichever finished last.

use std::future::Future;

use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::domain::ports::ApiError;

use super::document::Document;
use super::item::ItemRenderer;

/// Label of the retry control.
pub const RETRY_LABEL: &str = "Try Again";
/// `data-action` of the retry control; a full page reload.
pub const RELOAD_ACTION: &str = "reload";

/// Placeholder text shown while `collection` is being fetched.
pub fn loading_text(collection: &str) -> String {
    format!("Loading amazing {collection}...")
}

/// Lifecycle of one list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Populated { count: usize },
    Failed { title: String, detail: String },
}

#[component]
fn LoadingPlaceholder(collection: &'static str) -> Element {
    let text = loading_text(collection);
    rsx! {
        div { class: "loading flex flex-col items-center py-12",
            div { class: "spinner animate-spin rounded-full h-12 w-12 border-b-2 border-blue-600 mb-4" }
            p { class: "text-gray-600 font-medium", "{text}" }
        }
    }
}

#[component]
fn ErrorPanel(title: String, detail: String) -> Element {
    rsx! {
        div { class: "error-state text-center py-12", role: "alert",
            h3 { class: "error-title text-lg font-semibold text-gray-900 mb-2", "{title}" }
            p { class: "error-detail text-gray-600 mb-4", "{detail}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                "data-action": RELOAD_ACTION,
                "{RETRY_LABEL}"
            }
        }
    }
}

/// One container populated from one collection.
pub struct ListSection<R> {
    container: &'static str,
    collection: &'static str,
    renderer: Box<dyn ItemRenderer<R>>,
}

impl<R> ListSection<R> {
    /// `collection` names the records in the placeholder and the failure
    /// title, e.g. "Failed to load destinations".
    pub fn new(
        container: &'static str,
        collection: &'static str,
        renderer: impl ItemRenderer<R> + 'static,
    ) -> Self {
        Self {
            container,
            collection,
            renderer: Box::new(renderer),
        }
    }

    pub fn container(&self) -> &'static str {
        self.container
    }

    /// Every record rendered in source order.
    pub fn render_items(&self, records: &[R]) -> Element {
        rsx! {
            for record in records {
                {self.renderer.render(record)}
            }
        }
    }

    /// Show the loading placeholder, await `fetch`, then show the outcome.
    ///
    /// Returns the final state. A missing container is logged and skipped;
    /// it never aborts the fetch.
    pub async fn populate<F>(&self, document: &Document, fetch: F) -> ListState
    where
        F: Future<Output = Result<Vec<R>, ApiError>>,
    {
        let collection = self.collection;
        self.apply(document, rsx! { LoadingPlaceholder { collection } });
        match fetch.await {
            Ok(records) => {
                debug!(
                    container = self.container,
                    count = records.len(),
                    "list populated"
                );
                self.apply(document, self.render_items(&records));
                ListState::Populated {
                    count: records.len(),
                }
            }
            Err(err) => {
                warn!(container = self.container, error = %err, "list fetch failed");
                let title = format!("Failed to load {collection}");
                let detail = err.user_message().to_owned();
                self.apply(
                    document,
                    rsx! { ErrorPanel { title: title.clone(), detail: detail.clone() } },
                );
                ListState::Failed { title, detail }
            }
        }
    }

    fn apply(&self, document: &Document, content: Element) {
        if let Err(err) = document.replace(self.container, content) {
            warn!(error = %err, "list container unavailable");
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ServiceRecord;
    use crate::inbound::ui::document::{DESTINATIONS, SERVICE_TYPES};
    use crate::inbound::ui::item::ServiceTile;

    fn records(names: &[&str]) -> Vec<ServiceRecord> {
        names
            .iter()
            .map(|name| ServiceRecord {
                name: (*name).to_owned(),
                description: None,
                image: None,
            })
            .collect()
    }

    fn section() -> ListSection<ServiceRecord> {
        ListSection::new(SERVICE_TYPES, "services", ServiceTile)
    }

    #[tokio::test]
    async fn loading_is_visible_until_the_fetch_settles() {
        let document = Document::home();
        let section = section();
        let (sender, receiver) = tokio::sync::oneshot::channel::<Vec<ServiceRecord>>();

        let fetch = async move {
            receiver
                .await
                .map_err(|err| ApiError::transport(err.to_string()))
        };
        let populate = section.populate(&document, fetch);
        tokio::pin!(populate);

        assert!(futures_util::poll!(populate.as_mut()).is_pending());
        let container = document.container(SERVICE_TYPES).expect("container");
        assert!(container.contains("Loading amazing services..."), "{container}");
        assert!(!container.contains("destinations"), "{container}");

        sender.send(records(&["Hotels"])).expect("send");
        let state = populate.await;
        assert_eq!(state, ListState::Populated { count: 1 });
    }

    #[tokio::test]
    async fn records_render_in_source_order() {
        let document = Document::home();
        section()
            .populate(&document, async {
                Ok(records(&["Flights", "Hotels", "Visa"]))
            })
            .await;

        let container = document.container(SERVICE_TYPES).expect("container");
        let positions = ["<p>Flights</p>", "<p>Hotels</p>", "<p>Visa</p>"]
            .map(|name| container.find(name).expect("rendered name"));
        assert!(positions.is_sorted(), "{container}");
        assert!(!container.contains("Loading"), "{container}");
    }

    #[tokio::test]
    async fn failures_render_message_and_retry() {
        let document = Document::home();
        let state = ListSection::new(DESTINATIONS, "destinations", ServiceTile)
            .populate(&document, async {
                Err::<Vec<ServiceRecord>, _>(ApiError::request(500_u16, "db down"))
            })
            .await;

        assert_eq!(
            state,
            ListState::Failed {
                title: "Failed to load destinations".to_owned(),
                detail: "db down".to_owned(),
            }
        );
        let container = document.container(DESTINATIONS).expect("container");
        assert!(container.contains(r#"data-action="reload""#), "{container}");
        assert!(container.contains(RETRY_LABEL));
        assert!(container.contains("db down"));
    }

    #[tokio::test]
    async fn missing_containers_do_not_abort_the_fetch() {
        let document = Document::with_containers([DESTINATIONS]);
        let state = section()
            .populate(&document, async { Ok(records(&["Hotels"])) })
            .await;
        assert_eq!(state, ListState::Populated { count: 1 });
    }
}
