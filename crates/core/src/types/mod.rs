//! Core types for the Deportes Elite client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod price;

pub use credential::AuthToken;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
