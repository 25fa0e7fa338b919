//! Login and registration use-cases.
//!
//! Both endpoints answer with `{ token, user }`, optionally wrapped in a
//! `data` envelope. A successful call persists the session through
//! [`SessionService`] before returning it.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{ApiError, StorageError, TravelApi};
use crate::domain::{
    AuthToken, CredentialsValidationError, LoginCredentials, RegistrationForm,
    RegistrationValidationError, Session, SessionService, UserProfile, decode_payload,
};

/// Endpoint for signing in.
pub const LOGIN_PATH: &str = "/auth/login";
/// Endpoint for creating an account.
pub const REGISTER_PATH: &str = "/auth/register";

/// Failures surfaced by [`AuthService`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The form was rejected locally.
    #[error("{0}")]
    Validation(String),
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Text for the error notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Api(err) => err.user_message().to_owned(),
            Self::Storage(_) => "Unable to save your session. Please try again.".to_owned(),
        }
    }
}

impl From<CredentialsValidationError> for AuthError {
    fn from(value: CredentialsValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<RegistrationValidationError> for AuthError {
    fn from(value: RegistrationValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

#[derive(Deserialize)]
struct AuthPayload {
    token: String,
    user: UserProfile,
}

/// Signs users in and up against the backend.
pub struct AuthService {
    api: Arc<dyn TravelApi>,
    sessions: Arc<SessionService>,
}

impl AuthService {
    pub fn new(api: Arc<dyn TravelApi>, sessions: Arc<SessionService>) -> Self {
        Self { api, sessions }
    }

    /// `POST /auth/login`, then persist the returned session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        let body = self
            .api
            .post(LOGIN_PATH, &credentials.to_request_body())
            .await
            .inspect_err(|err| warn!(error = %err, "login rejected"))?;
        let session = Self::session_from(LOGIN_PATH, body)?;
        self.sessions.establish(session.clone())?;
        info!("user signed in");
        Ok(session)
    }

    /// `POST /auth/register`, then persist the returned session.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session, AuthError> {
        let body = self
            .api
            .post(REGISTER_PATH, &form.to_request_body())
            .await
            .inspect_err(|err| warn!(error = %err, "registration rejected"))?;
        let session = Self::session_from(REGISTER_PATH, body)?;
        self.sessions.establish(session.clone())?;
        info!("user registered");
        Ok(session)
    }

    /// Forget the current session.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear().map_err(AuthError::from)
    }

    fn session_from(path: &str, body: Value) -> Result<Session, ApiError> {
        let payload: AuthPayload =
            decode_payload(body).map_err(|message| ApiError::decode(format!("{path}: {message}")))?;
        let token = AuthToken::new(payload.token)
            .map_err(|err| ApiError::decode(format!("{path}: {err}")))?;
        Ok(Session::new(token, payload.user))
    }
}
