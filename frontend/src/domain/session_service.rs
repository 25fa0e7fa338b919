//! Owner of the signed-in session.
//!
//! The session lives in two storage entries, `authToken` (raw string) and
//! `userData` (JSON profile). `SessionService` is the only writer of those
//! keys and also acts as the [`TokenSource`] the HTTP adapter consults, so no
//! component reaches for global state.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::domain::ports::{SessionStorage, StorageError, TokenSource};
use crate::domain::{AuthToken, Session, UserProfile};

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the JSON user profile.
pub const USER_DATA_KEY: &str = "userData";

/// Session state shared between the UI and outbound adapters.
pub struct SessionService {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
}

impl SessionService {
    /// Create a service with no session loaded.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
        }
    }

    /// Load the persisted session, if any.
    ///
    /// A token without a readable profile (missing or corrupt `userData`) is
    /// treated as logged out and both keys are cleared. Only storage failures
    /// are returned as errors.
    pub fn restore(&self) -> Result<Option<Session>, StorageError> {
        let restored = self.read_persisted()?;
        self.replace(restored.clone());
        Ok(restored)
    }

    fn read_persisted(&self) -> Result<Option<Session>, StorageError> {
        let Some(raw_token) = self.storage.get(AUTH_TOKEN_KEY)? else {
            return Ok(None);
        };
        let Ok(token) = AuthToken::new(raw_token) else {
            warn!("stored auth token is blank; clearing session");
            self.remove_keys()?;
            return Ok(None);
        };

        let profile = self
            .storage
            .get(USER_DATA_KEY)?
            .ok_or_else(|| "user profile missing".to_owned())
            .and_then(|raw| {
                serde_json::from_str::<UserProfile>(&raw).map_err(|err| err.to_string())
            });

        match profile {
            Ok(user) => {
                info!("restored persisted session");
                Ok(Some(Session::new(token, user)))
            }
            Err(reason) => {
                warn!(%reason, "stored session is incomplete; clearing it");
                self.remove_keys()?;
                Ok(None)
            }
        }
    }

    /// Persist `session` and make it current.
    pub fn establish(&self, session: Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(session.user())
            .map_err(|err| StorageError::corrupt(err.to_string()))?;
        self.storage.set(AUTH_TOKEN_KEY, session.token().expose())?;
        self.storage.set(USER_DATA_KEY, &user)?;
        info!("session established");
        self.replace(Some(session));
        Ok(())
    }

    /// Forget the session in memory and in storage.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.replace(None);
        self.remove_keys()?;
        info!("session cleared");
        Ok(())
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn replace(&self, session: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn remove_keys(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        self.storage.remove(USER_DATA_KEY)
    }
}

impl TokenSource for SessionService {
    fn bearer_token(&self) -> Option<AuthToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token().clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{InMemorySessionStorage, MockSessionStorage};
    use rstest::{fixture, rstest};
    use serde_json::json;

    const PROFILE: &str = r#"{"first_name":"A","last_name":"B","email":"a@b.com"}"#;

    #[fixture]
    fn storage() -> Arc<InMemorySessionStorage> {
        Arc::new(InMemorySessionStorage::new())
    }

    fn session() -> Session {
        let user = serde_json::from_value(json!({
            "first_name": "A",
            "last_name": "B",
            "email": "a@b.com"
        }))
        .expect("profile");
        Session::new(AuthToken::new("t1").expect("token"), user)
    }

    #[rstest]
    fn restore_reads_both_keys(storage: Arc<InMemorySessionStorage>) {
        storage.set(AUTH_TOKEN_KEY, "t1").expect("seed token");
        storage.set(USER_DATA_KEY, PROFILE).expect("seed profile");
        let service = SessionService::new(storage);

        let restored = service.restore().expect("restore").expect("session");
        assert_eq!(restored.user().first_name, "A");
        assert_eq!(
            service.bearer_token().map(|token| token.expose().to_owned()),
            Some("t1".to_owned())
        );
    }

    #[rstest]
    #[case::missing_profile(None)]
    #[case::corrupt_profile(Some("{not json"))]
    #[case::profile_without_name(Some(r#"{"email":"a@b.com"}"#))]
    fn incomplete_sessions_are_cleared(#[case] profile: Option<&str>) {
        let storage = Arc::new(InMemorySessionStorage::with_entries([(AUTH_TOKEN_KEY, "t1")]));
        if let Some(profile) = profile {
            storage.set(USER_DATA_KEY, profile).expect("seed profile");
        }
        let service = SessionService::new(storage.clone());

        assert_eq!(service.restore().expect("restore"), None);
        assert!(!service.is_authenticated());
        assert!(storage.snapshot().is_empty());
    }

    #[rstest]
    fn profile_without_token_is_ignored(storage: Arc<InMemorySessionStorage>) {
        storage.set(USER_DATA_KEY, PROFILE).expect("seed profile");
        let service = SessionService::new(storage.clone());

        assert_eq!(service.restore().expect("restore"), None);
        assert!(storage.snapshot().contains_key(USER_DATA_KEY));
    }

    #[rstest]
    fn establish_then_clear_round_trips(storage: Arc<InMemorySessionStorage>) {
        let service = SessionService::new(storage.clone());

        service.establish(session()).expect("establish");
        let stored = storage.snapshot();
        assert_eq!(stored.get(AUTH_TOKEN_KEY).map(String::as_str), Some("t1"));
        let user: serde_json::Value =
            serde_json::from_str(stored.get(USER_DATA_KEY).expect("profile")).expect("json");
        assert_eq!(user["email"], json!("a@b.com"));

        service.clear().expect("clear");
        assert!(storage.snapshot().is_empty());
        assert!(service.bearer_token().is_none());
    }

    #[test]
    fn storage_failures_propagate() {
        let mut storage = MockSessionStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(StorageError::io("disk unplugged")));
        let service = SessionService::new(Arc::new(storage));

        let err = service.restore().expect_err("io failure");
        assert_eq!(err, StorageError::io("disk unplugged"));
    }
}
