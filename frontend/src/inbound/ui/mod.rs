//! Page components.

pub mod document;
pub mod forms;
pub mod home;
pub mod icons;
pub mod item;
pub mod list_page;
pub mod modal;
pub mod notification;
pub mod session_ui;

pub use document::{
    DESTINATIONS, Document, NAV_AUTH, NOTIFICATIONS, PresentationError, SERVICE_TYPES,
    render_markup,
};
pub use forms::{BookingKind, BookingOutcome, FormController, LoginForm, RegisterForm};
pub use home::{HomeApp, HomeDependencies, HomePage};
pub use item::{DestinationCard, ItemRenderer, ServiceTile, ServiceTypeCard};
pub use list_page::{ListSection, ListState, RELOAD_ACTION, RETRY_LABEL, loading_text};
pub use modal::{ClickTarget, LOGIN_MODAL, ModalController, ModalState, REGISTER_MODAL};
pub use notification::{DEFAULT_NOTIFICATION_TIMEOUT, NotificationCenter};
pub use session_ui::{SessionUi, render_nav};
