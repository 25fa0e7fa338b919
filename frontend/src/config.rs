//! Page settings loaded via OrthoConfig.
//!
//! Values come from `NOMADO_*` environment variables, configuration files,
//! and command-line flags. Unset values fall back to local-development
//! defaults, so the binary runs with no configuration at all.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Backend base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Directory holding `session.json` when none is configured.
pub const DEFAULT_STORAGE_DIR: &str = ".nomado";
/// Notification lifetime in milliseconds when none is configured.
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 5000;

/// Configuration for the page bootstrap.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOMADO")]
pub struct FrontendSettings {
    /// Backend API base URL, e.g. `https://nomado.example/api`.
    #[ortho_config(default = String::from(DEFAULT_API_BASE_URL))]
    pub api_base_url: String,
    /// Directory for persisted session state.
    #[ortho_config(default = String::from(DEFAULT_STORAGE_DIR))]
    pub storage_dir: String,
    /// How long notifications stay visible.
    #[ortho_config(default = DEFAULT_NOTIFICATION_TIMEOUT_MS)]
    pub notification_timeout_ms: u64,
    /// Per-request timeout. Requests are unbounded when unset.
    pub request_timeout_secs: Option<u64>,
}

/// Invalid setting values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid api base url `{value}`: {message}")]
    InvalidBaseUrl { value: String, message: String },
}

impl FrontendSettings {
    /// Parsed backend base URL. A blank value selects the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value is not an
    /// absolute URL.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = match self.api_base_url.trim() {
            "" => DEFAULT_API_BASE_URL,
            configured => configured,
        };
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn storage_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.storage_dir.as_str())
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }

    /// `None` means no timeout. Zero is treated as unset.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for page settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "NOMADO_API_BASE_URL",
        "NOMADO_STORAGE_DIR",
        "NOMADO_NOTIFICATION_TIMEOUT_MS",
        "NOMADO_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> FrontendSettings {
        FrontendSettings::load_from_iter([OsString::from("nomado-page")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("default url").as_str(),
            "http://localhost:8080/api"
        );
        assert_eq!(settings.storage_dir(), Utf8PathBuf::from(DEFAULT_STORAGE_DIR));
        assert_eq!(settings.notification_timeout(), Duration::from_millis(5000));
        assert_eq!(settings.request_timeout(), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("NOMADO_API_BASE_URL", Some("https://nomado.example/api".to_owned())),
            ("NOMADO_STORAGE_DIR", Some("/tmp/nomado".to_owned())),
            ("NOMADO_NOTIFICATION_TIMEOUT_MS", Some("1500".to_owned())),
            ("NOMADO_REQUEST_TIMEOUT_SECS", Some("30".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("url").host_str(),
            Some("nomado.example")
        );
        assert_eq!(settings.storage_dir(), Utf8PathBuf::from("/tmp/nomado"));
        assert_eq!(settings.notification_timeout(), Duration::from_millis(1500));
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
    }

    fn settings_with(api_base_url: &str, request_timeout_secs: Option<u64>) -> FrontendSettings {
        FrontendSettings {
            api_base_url: api_base_url.to_owned(),
            storage_dir: DEFAULT_STORAGE_DIR.to_owned(),
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
            request_timeout_secs,
        }
    }

    #[rstest]
    #[case::relative("/api")]
    #[case::garbage("not a url")]
    fn invalid_base_urls_are_rejected(#[case] raw: &str) {
        let settings = settings_with(raw, None);
        assert!(matches!(
            settings.api_base_url(),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn zero_request_timeout_means_unbounded() {
        let settings = settings_with(DEFAULT_API_BASE_URL, Some(0));
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn blank_base_url_selects_the_default() {
        let settings = settings_with("  ", None);
        assert_eq!(
            settings.api_base_url().expect("default url").as_str(),
            DEFAULT_API_BASE_URL
        );
    }
}
