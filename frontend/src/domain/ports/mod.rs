//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod navigator;
mod session_storage;
mod token_source;
mod travel_api;

#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, RecordingNavigator};
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{InMemorySessionStorage, SessionStorage, StorageError};
#[cfg(test)]
pub use token_source::MockTokenSource;
pub use token_source::{NoToken, StaticToken, TokenSource};
#[cfg(test)]
pub use travel_api::MockTravelApi;
pub use travel_api::{
    ApiError, FixtureTravelApi, GENERIC_REQUEST_FAILURE, RecordedRequest, TravelApi,
};
