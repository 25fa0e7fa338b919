//! Typed catalogue queries over the [`TravelApi`] port.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{ApiError, TravelApi};
use crate::domain::{Booking, DestinationRecord, ServiceRecord, decode_payload};

/// Endpoint for the service type list.
pub const SERVICE_TYPES_PATH: &str = "/service-types";
/// Endpoint for the destination list.
pub const DESTINATIONS_PATH: &str = "/destinations";
/// Endpoint for the signed-in user's bookings.
pub const BOOKINGS_PATH: &str = "/bookings";

/// Fetches catalogue collections and normalises their envelopes.
#[derive(Clone)]
pub struct CatalogueService {
    api: Arc<dyn TravelApi>,
}

impl CatalogueService {
    pub fn new(api: Arc<dyn TravelApi>) -> Self {
        Self { api }
    }

    /// `GET /service-types`.
    pub async fn service_types(&self) -> Result<Vec<ServiceRecord>, ApiError> {
        self.fetch_list(SERVICE_TYPES_PATH).await
    }

    /// `GET /destinations`.
    pub async fn destinations(&self) -> Result<Vec<DestinationRecord>, ApiError> {
        self.fetch_list(DESTINATIONS_PATH).await
    }

    /// `GET /bookings`. The backend requires a bearer token.
    pub async fn bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.fetch_list(BOOKINGS_PATH).await
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let body = self.api.get(path, &[]).await?;
        let items: Vec<T> =
            decode_payload(body).map_err(|message| ApiError::decode(format!("{path}: {message}")))?;
        debug!(path, count = items.len(), "catalogue list decoded");
        Ok(items)
    }
}
