//! Authenticated session primitives: bearer token and user profile.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Validation errors raised while building session values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// The token was empty once trimmed.
    EmptyToken,
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "auth token must not be empty"),
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Opaque bearer token issued by the backend.
///
/// ## Invariants
/// - Never empty once trimmed.
/// - The secret is wiped from memory on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use frontend::domain::AuthToken;
///
/// let token = AuthToken::new("t1").unwrap();
/// assert_eq!(token.expose(), "t1");
/// assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Validate and wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Raw token for the `Authorization` header and for storage.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Profile of the signed-in user as returned by the auth endpoints.
///
/// Fields the UI does not read are retained in `extra` so the profile
/// survives a round trip through storage unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Given name, used in the greeting.
    pub first_name: String,
    /// Family name; empty when the backend omits it.
    #[serde(default)]
    pub last_name: String,
    /// Contact address shown in the account menu.
    #[serde(default)]
    pub email: String,
    /// Remaining profile fields (`id`, `phone`, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Greeting shown in the navigation bar.
    pub fn welcome(&self) -> String {
        format!("Welcome, {}!", self.first_name.trim())
    }

    /// Uppercased first letters of the first and last names.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// First and last name joined by a space, skipping blanks.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A signed-in user: token plus profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: AuthToken,
    user: UserProfile,
}

impl Session {
    /// Pair a token with its profile.
    pub fn new(token: AuthToken, user: UserProfile) -> Self {
        Self { token, user }
    }

    /// Bearer token.
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// User profile.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn profile(first: &str, last: &str) -> UserProfile {
        serde_json::from_value(json!({ "first_name": first, "last_name": last }))
            .expect("profile")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_tokens_are_rejected(#[case] raw: &str) {
        assert_eq!(AuthToken::new(raw), Err(SessionValidationError::EmptyToken));
    }

    #[rstest]
    #[case("ada", "lovelace", "AL")]
    #[case("A", "", "A")]
    #[case("  émile ", "zola", "ÉZ")]
    fn initials_use_first_letters(#[case] first: &str, #[case] last: &str, #[case] expected: &str) {
        assert_eq!(profile(first, last).initials(), expected);
    }

    #[test]
    fn minimal_profile_defaults_optional_fields() {
        let user: UserProfile =
            serde_json::from_value(json!({ "first_name": "A" })).expect("minimal profile");
        assert_eq!(user.welcome(), "Welcome, A!");
        assert_eq!(user.full_name(), "A");
        assert!(user.email.is_empty());
    }

    #[test]
    fn unknown_profile_fields_survive_a_round_trip() {
        let raw = json!({
            "id": 7,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 0000 0000"
        });
        let user: UserProfile = serde_json::from_value(raw.clone()).expect("profile");
        assert_eq!(user.extra.get("phone"), Some(&json!("+44 20 0000 0000")));
        assert_eq!(serde_json::to_value(&user).expect("encode"), raw);
    }
}
