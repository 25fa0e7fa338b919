//! Named overlay dialogs.
//!
//! Each registered modal is either closed or open. Several may be open at
//! once; no stacking order or focus trap is maintained.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dioxus::prelude::*;
use tracing::debug;

use super::document::PresentationError;

pub const LOGIN_MODAL: &str = "loginModal";
pub const REGISTER_MODAL: &str = "registerModal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Where a click landed, as resolved by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget<'a> {
    /// The dimmed overlay of modal `id`, outside its content box.
    Backdrop(&'a str),
    /// Inside the content box of modal `id`.
    Content(&'a str),
    /// Anywhere else on the page.
    Elsewhere,
}

/// Open/closed state for every registered modal.
#[derive(Debug, Default)]
pub struct ModalController {
    modals: Mutex<BTreeMap<String, ModalState>>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with the login and register dialogs registered.
    pub fn with_auth_modals() -> Self {
        let controller = Self::new();
        controller.register(LOGIN_MODAL);
        controller.register(REGISTER_MODAL);
        controller
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, ModalState>> {
        self.modals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `id` as closed. Re-registering keeps the current state.
    pub fn register(&self, id: &str) {
        self.lock().entry(id.to_owned()).or_insert(ModalState::Closed);
    }

    fn set(&self, id: &str, state: ModalState) -> Result<(), PresentationError> {
        let mut modals = self.lock();
        let slot = modals
            .get_mut(id)
            .ok_or_else(|| PresentationError::UnknownModal { id: id.to_owned() })?;
        *slot = state;
        debug!(modal = id, ?state, "modal state changed");
        Ok(())
    }

    pub fn open(&self, id: &str) -> Result<(), PresentationError> {
        self.set(id, ModalState::Open)
    }

    pub fn close(&self, id: &str) -> Result<(), PresentationError> {
        self.set(id, ModalState::Closed)
    }

    /// Close `from`, then open `to`. Both must be registered; nothing
    /// changes otherwise.
    pub fn switch(&self, from: &str, to: &str) -> Result<(), PresentationError> {
        self.state(to)?;
        self.close(from)?;
        self.open(to)
    }

    pub fn state(&self, id: &str) -> Result<ModalState, PresentationError> {
        self.lock()
            .get(id)
            .copied()
            .ok_or_else(|| PresentationError::UnknownModal { id: id.to_owned() })
    }

    /// Unknown ids read as closed.
    pub fn is_open(&self, id: &str) -> bool {
        matches!(self.state(id), Ok(ModalState::Open))
    }

    /// Ids of every open modal.
    pub fn open_modals(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(_, state)| **state == ModalState::Open)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Close the modal whose backdrop was clicked. Returns the closed id.
    pub fn handle_click(&self, target: ClickTarget<'_>) -> Option<String> {
        let ClickTarget::Backdrop(id) = target else {
            return None;
        };
        if !self.is_open(id) {
            return None;
        }
        self.close(id).ok().map(|()| id.to_owned())
    }

    /// Overlay wrapping `content`; hidden while closed.
    pub fn render(&self, id: &str, content: Element) -> Result<Element, PresentationError> {
        let state = self.state(id)?;
        let visibility = match state {
            ModalState::Open => "modal open",
            ModalState::Closed => "modal hidden",
        };
        let hidden = state == ModalState::Closed;
        Ok(rsx! {
            div {
                class: "{visibility} fixed inset-0 bg-black/50 flex items-center justify-center",
                id: "{id}",
                "aria-hidden": "{hidden}",
                div { class: "modal-content bg-white rounded-2xl shadow-xl w-full max-w-md p-6",
                    {content}
                }
            }
        })
    }
}
