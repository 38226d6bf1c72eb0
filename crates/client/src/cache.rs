//! In-memory cache for catalog responses.
//!
//! The public catalog is read far more often than it changes, so product
//! reads are cached for five minutes. Cart, profile, and order responses
//! are never cached; they are per-user state.

use std::time::Duration;

use deportes_elite_core::{Page, Product, ProductId};
use moka::future::Cache;

/// How long catalog responses stay fresh.
const CATALOG_TTL: Duration = Duration::from_secs(300);

/// Upper bound on cached catalog entries.
const CATALOG_CAPACITY: u64 = 1_000;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products { page: u32, size: u32 },
    Category { name: String, page: u32, size: u32 },
}

/// Cached catalog values.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Page<Product>),
}

/// Build the catalog cache with the standard TTL and capacity.
#[must_use]
pub fn catalog_cache() -> Cache<CacheKey, CacheValue> {
    Cache::builder()
        .max_capacity(CATALOG_CAPACITY)
        .time_to_live(CATALOG_TTL)
        .build()
}
