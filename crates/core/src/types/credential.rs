//! Session credential type.
//!
//! The backend issues a single opaque bearer token on login. At most one
//! token exists at a time; there is no refresh-token or rotation model.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// An opaque bearer token proving an authenticated session.
///
/// The value is held in a [`SecretString`] so it never leaks through
/// `Debug` output or logs.
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// Create a new token from its string value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the token value for use in an `Authorization` header or the
    /// credential store.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AuthToken {}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiJ9.secret");
        let debug = format!("{token:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_expose_and_eq() {
        let token = AuthToken::new("abc123");
        assert_eq!(token.expose(), "abc123");
        assert_eq!(token, AuthToken::from("abc123"));
        assert_ne!(token, AuthToken::from("other"));
    }
}
