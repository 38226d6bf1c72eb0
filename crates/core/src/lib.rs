//! Deportes Elite Core - Shared types library.
//!
//! This crate provides common types used across all Deportes Elite client
//! components:
//! - `client` - API gateway and typed endpoint operations
//! - `cli` - Command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and the
//!   session credential
//! - [`models`] - Records mirroring the backend entities (products, cart
//!   items, orders, user profile)
//! - [`api`] - Wire envelopes and request bodies for the backend API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod models;
pub mod types;

pub use api::*;
pub use models::*;
pub use types::*;
