//! Accessor port through which outbound adapters read the bearer token.
//!
//! The HTTP client never owns session state; it asks this port for the
//! current token on every request so logins and logouts take effect
//! immediately.

use crate::domain::AuthToken;

/// Supplies the bearer token for outbound requests, if any.
#[cfg_attr(test, mockall::automock)]
pub trait TokenSource: Send + Sync {
    /// Token to attach as `Authorization: Bearer <token>`.
    fn bearer_token(&self) -> Option<AuthToken>;
}

/// Token source for anonymous clients.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn bearer_token(&self) -> Option<AuthToken> {
        None
    }
}

/// Token source that always yields one fixed token.
#[derive(Debug, Clone)]
pub struct StaticToken(pub AuthToken);

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<AuthToken> {
        Some(self.0.clone())
    }
}
