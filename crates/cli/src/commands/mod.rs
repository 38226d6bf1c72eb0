//! Shared command context and error type.
//!
//! Every command gets a [`Context`] holding the storefront client (backed
//! by an on-disk credential store, so the session survives between
//! invocations) and the slot for the last checkout's order record.

pub mod account;
pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use deportes_elite_client::{
    ApiConfig, ApiError, ConfigError, FileCredentialStore, LastOrderStore, SessionEvents,
    StoreError, StorefrontClient,
};
use deportes_elite_core::EmailError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The on-disk session state could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An email argument is not a valid address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A date argument is not a valid `YYYY-MM-DD` date.
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),
}

/// Shared state for a single command invocation.
pub struct Context {
    /// Client with the on-disk credential store attached.
    pub client: StorefrontClient,
    /// Slot holding the order record from the most recent checkout.
    pub last_orders: LastOrderStore,
}

impl Context {
    /// Build the context from the environment.
    ///
    /// The session directory defaults to `~/.deportes-elite` and can be
    /// overridden with `DEPORTES_SESSION_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the configuration is invalid.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ApiConfig::from_env()?;
        let session_dir = session_dir();

        let client = StorefrontClient::builder(config)
            .credential_store(std::sync::Arc::new(FileCredentialStore::new(
                session_dir.join("credential"),
            )))
            .session_events(std::sync::Arc::new(CliEvents))
            .build();

        Ok(Self {
            client,
            last_orders: LastOrderStore::new(session_dir.join("last-order.json")),
        })
    }
}

/// Where the credential and last-order record live between invocations.
fn session_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DEPORTES_SESSION_DIR") {
        return PathBuf::from(dir);
    }
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(".deportes-elite"),
        |home| PathBuf::from(home).join(".deportes-elite"),
    )
}

/// Session event sink for the terminal.
///
/// The expiry notification prints immediately; the redirect has no meaning
/// in a short-lived process, so it is only logged.
struct CliEvents;

impl SessionEvents for CliEvents {
    #[allow(clippy::print_stdout)]
    fn notify_session_expired(&self) {
        println!("Your session has expired. Please log in again.");
    }

    fn redirect_to_login(&self) {
        tracing::debug!("login redirect requested");
    }
}

/// Report a failed command to the user.
///
/// Authentication failures were already announced through [`CliEvents`],
/// so they only get a hint about the login command here.
#[allow(clippy::print_stdout)]
pub fn report_error(error: &CliError) {
    if let CliError::Api(api) = error {
        if api.is_auth_error() {
            println!("Run `deportes-cli login` to start a session.");
            return;
        }
    }
    tracing::error!("Command failed: {error}");
}
