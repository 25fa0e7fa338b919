//! Domain primitives, services, and ports.
//!
//! Nothing in this module performs I/O directly; network and storage access
//! go through the traits in [`ports`].

pub mod auth_service;
pub mod catalogue_service;
pub mod category;
pub mod credentials;
pub mod notification;
pub mod payload;
pub mod ports;
pub mod records;
pub mod session;
pub mod session_service;

pub use self::auth_service::{AuthError, AuthService, LOGIN_PATH, REGISTER_PATH};
pub use self::catalogue_service::{
    BOOKINGS_PATH, CatalogueService, DESTINATIONS_PATH, SERVICE_TYPES_PATH,
};
pub use self::category::{CATEGORY_RULES, CategoryRule, ServiceCategory};
pub use self::credentials::{
    CredentialsValidationError, LoginCredentials, MIN_PASSWORD_LENGTH, RegistrationForm,
    RegistrationInput, RegistrationValidationError,
};
pub use self::notification::{NotificationId, NotificationKind, NotificationMessage};
pub use self::payload::{Payload, decode_payload};
pub(crate) use self::records::non_blank;
pub use self::records::{Booking, DestinationRecord, DisplayValue, ServiceRecord};
pub use self::session::{AuthToken, Session, SessionValidationError, UserProfile};
pub use self::session_service::{AUTH_TOKEN_KEY, SessionService, USER_DATA_KEY};
