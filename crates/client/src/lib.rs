//! Deportes Elite storefront client library.
//!
//! Every call to the backend goes through one [`gateway::Gateway`], which
//! attaches the session credential, classifies authentication failures, and
//! notifies the embedding application when the session must be renewed.
//! [`client::StorefrontClient`] layers the typed storefront operations
//! (catalog, cart, checkout, profile) on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use deportes_elite_client::{ApiConfig, StorefrontClient};
//!
//! let config = ApiConfig::from_env()?;
//! let client = StorefrontClient::new(&config);
//!
//! client.login("ana@example.com", "contraseña").await?;
//! let page = client.products(0, 20).await?;
//! client.add_to_cart(page.content[0].id, 1).await?;
//! let order = client.checkout().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;

pub use client::StorefrontClient;
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use gateway::{Access, Gateway, NoopEvents, SessionEvents};
pub use session::{
    CredentialStore, FileCredentialStore, LastOrderStore, MemoryCredentialStore, StoreError,
};
