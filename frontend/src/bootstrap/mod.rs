//! Adapter selection and page assembly.
//!
//! This is the only place that names concrete adapters: the reqwest client,
//! the file session store, and the system clock.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use frontend::FrontendSettings;
use frontend::domain::SessionService;
use frontend::domain::ports::RecordingNavigator;
use frontend::inbound::ui::{HomeApp, HomeDependencies};
use frontend::outbound::http::HttpTravelApi;
use frontend::outbound::storage::FileSessionStorage;
use mockable::DefaultClock;
use tracing::info;

/// Build the home page from settings.
///
/// # Errors
///
/// Fails when the base URL is invalid, the storage directory cannot be
/// opened, or the HTTP client cannot be constructed.
pub fn build_home_app(settings: &FrontendSettings) -> Result<HomeApp> {
    let base_url = settings.api_base_url()?;
    let storage_dir = settings.storage_dir();
    let storage = FileSessionStorage::open(&storage_dir)
        .wrap_err_with(|| format!("failed to open session storage at {storage_dir}"))?;
    let sessions = Arc::new(SessionService::new(Arc::new(storage)));
    let api = HttpTravelApi::new(base_url, sessions.clone(), settings.request_timeout())
        .wrap_err("failed to build HTTP client")?;
    info!(base_url = %api.base_url(), storage_dir = %storage_dir, "page adapters ready");

    Ok(HomeApp::new(HomeDependencies {
        api: Arc::new(api),
        sessions,
        // A one-shot render has no browser to send anywhere.
        navigator: Arc::new(RecordingNavigator::new()),
        clock: Arc::new(DefaultClock),
        notification_timeout: settings.notification_timeout(),
    }))
}
