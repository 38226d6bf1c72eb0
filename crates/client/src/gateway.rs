//! Authenticated request gateway.
//!
//! Performs HTTP requests against the backend, transparently attaching the
//! session credential and uniformly handling the two categories of
//! authentication failure: absent credential and expired credential. All
//! typed operations in [`crate::client`] go through here.
//!
//! The gateway deliberately provides no cross-call coordination: no request
//! deduplication, no in-flight cancellation, no queueing. Overlapping
//! mutations resolve to whichever response arrives last.

use std::sync::Arc;
use std::time::Duration;

use deportes_elite_core::Envelope;
use reqwest::{Method, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::session::CredentialStore;

/// Whether an endpoint may be called without a credential.
///
/// Endpoints are marked explicitly instead of sniffing the path for a
/// public prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credential required (`/open` endpoints).
    Public,
    /// A stored credential is required; its absence fails the call before
    /// any network request is made.
    Protected,
}

/// Collaborators the gateway drives when the session must be renewed:
/// a user-facing notification sink and a navigation mechanism.
///
/// `redirect_to_login` is invoked on a spawned task after the configured
/// delay so the notification can render before navigation fires.
pub trait SessionEvents: Send + Sync {
    /// Tell the user their session expired and they must log in again.
    fn notify_session_expired(&self);

    /// Navigate to the login entry point.
    fn redirect_to_login(&self);
}

/// Event sink that ignores everything, for embedders that handle
/// authentication failures purely through [`ApiError`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl SessionEvents for NoopEvents {
    fn notify_session_expired(&self) {}
    fn redirect_to_login(&self) {}
}

/// Error body the backend sends on non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// The authenticated request gateway.
///
/// Cheap to clone; the HTTP client, credential store, and event sink are
/// shared.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    events: Arc<dyn SessionEvents>,
    redirect_delay: Duration,
}

impl Gateway {
    /// Create a gateway against the given backend.
    #[must_use]
    pub fn new(
        base_url: Url,
        store: Arc<dyn CredentialStore>,
        events: Arc<dyn SessionEvents>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            events,
            redirect_delay,
        }
    }

    /// The credential store this gateway reads before every call.
    #[must_use]
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Perform a body-less request and parse the response envelope.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        access: Access,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        self.request(method, path, access, query, None).await
    }

    /// Perform a request carrying a JSON body and parse the response
    /// envelope.
    ///
    /// # Errors
    ///
    /// See [`Self::request`]; additionally fails with
    /// [`ApiError::Encode`] if the body cannot be serialized.
    pub async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        access: Access,
        body: &B,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: serde::Serialize + Sync,
    {
        let body = serde_json::to_value(body)?;
        self.request(method, path, access, &[], Some(&body)).await
    }

    /// Perform a request and parse the response envelope.
    ///
    /// Behavior, in order:
    /// 1. A protected call with no stored credential fails with
    ///    [`ApiError::Unauthenticated`] before any network request; the
    ///    session-expired notification and delayed login redirect fire.
    /// 2. The credential (when present) is attached as a bearer header
    ///    together with a JSON content type.
    /// 3. A 401 reply clears the stored credential, fires the same
    ///    notification and redirect, and fails with
    ///    [`ApiError::SessionExpired`].
    /// 4. Any other non-success reply fails with
    ///    [`ApiError::RequestFailed`], carrying the message parsed from the
    ///    body (empty when unparsable). The stored credential is untouched.
    /// 5. A success reply is parsed as an [`Envelope`] and returned as-is;
    ///    a 2xx body that does not parse is [`ApiError::MalformedResponse`].
    ///
    /// # Errors
    ///
    /// See the taxonomy in [`crate::error`].
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        access: Access,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let token = self.store.load()?;

        if token.is_none() && access == Access::Protected {
            tracing::debug!(path, "protected call without a stored credential");
            self.session_expired();
            return Err(ApiError::Unauthenticated);
        }

        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let mut request = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = &token {
            request = request.bearer_auth(token.expose());
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.store.clear()?;
            tracing::debug!(path, "credential rejected by backend, cleared");
            self.session_expired();
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let error = response.json::<ErrorBody>().await.unwrap_or_default();
            tracing::debug!(path, status = status.as_u16(), "request failed");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message: error.message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Notify the user and schedule the login redirect after the
    /// configured delay.
    fn session_expired(&self) {
        self.events.notify_session_expired();

        let events = Arc::clone(&self.events);
        let delay = self.redirect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            events.redirect_to_login();
        });
    }
}
