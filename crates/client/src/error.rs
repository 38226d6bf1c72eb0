//! Unified error taxonomy for backend calls.
//!
//! Callers dispatch on these kinds rather than comparing message strings.
//! The two authentication-related kinds are already reported to the user by
//! the gateway (notification plus scheduled login redirect); call sites
//! should suppress their own reporting for those and surface the rest.

use thiserror::Error;

use crate::session::StoreError;

/// Errors produced by the gateway and the typed operations on top of it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A protected call was made with no stored credential. No network
    /// request was performed.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend rejected the stored credential. The credential has been
    /// cleared from the store.
    #[error("session expired")]
    SessionExpired,

    /// The backend answered with a non-success, non-authentication status.
    #[error("request failed ({status}): {message}")]
    RequestFailed {
        /// HTTP status code of the reply.
        status: u16,
        /// Message parsed from the error body, empty if unparsable.
        message: String,
    },

    /// A success reply carried no usable payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request never produced an HTTP reply (connect, timeout, body).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The resource path could not be joined onto the base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request body could not be encoded as JSON.
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The credential store failed.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Whether this is one of the two authentication-related kinds the
    /// gateway has already reported to the user.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::SessionExpired)
    }
}
