//! Page model: named containers components render into.
//!
//! Components hand the [`Document`] a dioxus [`Element`] for a container id.
//! The element is rendered to HTML straight away and the fragment replaces
//! whatever the container held. The document is shared by reference between
//! concurrently polled futures on one thread, hence the interior mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use dioxus::prelude::*;
use thiserror::Error;

/// Navigation area holding the auth controls.
pub const NAV_AUTH: &str = "nav-auth";
/// Grid of service type cards.
pub const SERVICE_TYPES: &str = "service-types";
/// Grid of destination cards.
pub const DESTINATIONS: &str = "destinations";
/// Toast host.
pub const NOTIFICATIONS: &str = "notifications";

/// Non-fatal UI wiring failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("container `{id}` is not present in the document")]
    MissingContainer { id: String },
    #[error("modal `{id}` is not registered")]
    UnknownModal { id: String },
}

/// Render `element` to an HTML fragment.
pub fn render_markup(element: Element) -> String {
    dioxus_ssr::render_element(element)
}

#[derive(Debug, Clone)]
struct Container {
    id: String,
    html: String,
}

/// Ordered set of containers making up one page.
#[derive(Debug)]
pub struct Document {
    containers: Mutex<Vec<Container>>,
}

impl Document {
    /// Document with one empty `section` per id.
    pub fn with_containers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let containers = ids
            .into_iter()
            .map(|id| Container {
                id: id.to_owned(),
                html: String::new(),
            })
            .collect();
        Self {
            containers: Mutex::new(containers),
        }
    }

    /// The home page layout.
    pub fn home() -> Self {
        Self::with_containers([NAV_AUTH, SERVICE_TYPES, DESTINATIONS, NOTIFICATIONS])
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Container>> {
        self.containers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, id: &str, html: String) -> Result<(), PresentationError> {
        let mut containers = self.lock();
        let container = containers
            .iter_mut()
            .find(|container| container.id == id)
            .ok_or_else(|| PresentationError::MissingContainer { id: id.to_owned() })?;
        container.html = html;
        Ok(())
    }

    /// Replace the content of container `id` wholesale.
    pub fn replace(&self, id: &str, content: Element) -> Result<(), PresentationError> {
        if !self.has_container(id) {
            return Err(PresentationError::MissingContainer { id: id.to_owned() });
        }
        self.set(id, render_markup(content))
    }

    /// Empty container `id`.
    pub fn clear(&self, id: &str) -> Result<(), PresentationError> {
        self.set(id, String::new())
    }

    /// Inner HTML of container `id`.
    pub fn container(&self, id: &str) -> Option<String> {
        self.lock()
            .iter()
            .find(|container| container.id == id)
            .map(|container| container.html.clone())
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.lock().iter().any(|container| container.id == id)
    }

    /// Every container as a `section`, in layout order.
    pub fn to_html(&self) -> String {
        let containers = self.lock().clone();
        render_markup(rsx! {
            for container in containers {
                section { id: "{container.id}", dangerous_inner_html: "{container.html}" }
            }
        })
    }
}
