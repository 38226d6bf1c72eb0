//! Typed storefront operations.
//!
//! [`StorefrontClient`] wraps the [`Gateway`] with one method per backend
//! operation: authentication, the public catalog, the shopping cart,
//! checkout, and the user profile. Catalog reads go through the in-memory
//! cache; everything else hits the backend directly.

use std::sync::Arc;
use std::time::Duration;

use deportes_elite_core::{
    AuthToken, CartItem, Envelope, LoginData, LoginRequest, Order, Page, Price, Product,
    ProductId, ProfileUpdate, RegisterRequest, UserProfile,
};
use moka::future::Cache;
use reqwest::Method;

use crate::cache::{CacheKey, CacheValue, catalog_cache};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::gateway::{Access, Gateway, NoopEvents, SessionEvents};
use crate::session::{CredentialStore, MemoryCredentialStore};

/// Client for the Deportes Elite storefront API.
///
/// Cheap to clone; all state is shared behind an `Arc`.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    gateway: Gateway,
    catalog: Cache<CacheKey, CacheValue>,
}

/// Builder for [`StorefrontClient`], for embedders that supply their own
/// credential store or session event sink.
pub struct StorefrontClientBuilder {
    config: ApiConfig,
    store: Arc<dyn CredentialStore>,
    events: Arc<dyn SessionEvents>,
}

impl StorefrontClientBuilder {
    /// Use the given credential store instead of the in-memory default.
    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = store;
        self
    }

    /// Use the given session event sink instead of the no-op default.
    #[must_use]
    pub fn session_events(mut self, events: Arc<dyn SessionEvents>) -> Self {
        self.events = events;
        self
    }

    /// Override the delay before the scheduled login redirect.
    #[must_use]
    pub const fn redirect_delay(mut self, delay: Duration) -> Self {
        self.config.redirect_delay = delay;
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> StorefrontClient {
        StorefrontClient {
            inner: Arc::new(ClientInner {
                gateway: Gateway::new(
                    self.config.base_url,
                    self.store,
                    self.events,
                    self.config.redirect_delay,
                ),
                catalog: catalog_cache(),
            }),
        }
    }
}

impl StorefrontClient {
    /// Create a client with an in-memory credential store and no event
    /// sink.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self::builder(config.clone()).build()
    }

    /// Start building a client with a custom store or event sink.
    #[must_use]
    pub fn builder(config: ApiConfig) -> StorefrontClientBuilder {
        StorefrontClientBuilder {
            config,
            store: Arc::new(MemoryCredentialStore::new()),
            events: Arc::new(NoopEvents),
        }
    }

    /// The credential store backing this client's session.
    #[must_use]
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        self.inner.gateway.credential_store()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────

    /// Log in and store the issued credential.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] on bad credentials, or
    /// [`ApiError::MalformedResponse`] if a success reply carries no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let envelope: Envelope<LoginData> = self
            .inner
            .gateway
            .send_json(Method::POST, "/open/login", Access::Public, &request)
            .await?;
        let data = require_data(envelope, "login token")?;

        self.credential_store()
            .store(&AuthToken::new(data.token))?;
        tracing::info!("logged in, credential stored");
        Ok(())
    }

    /// Register a new account. Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] on validation errors (for
    /// example an already-registered email).
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .inner
            .gateway
            .send_json(Method::POST, "/open/register", Access::Public, request)
            .await?;
        Ok(envelope.message)
    }

    /// Drop the stored credential. Purely client-side, as the backend
    /// keeps no session state beyond the token itself.
    ///
    /// # Errors
    ///
    /// Fails if the credential store cannot be written.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.credential_store().clear()?;
        tracing::info!("logged out, credential cleared");
        Ok(())
    }

    /// Whether a credential is currently stored.
    ///
    /// # Errors
    ///
    /// Fails if the credential store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.credential_store().load()?.is_some())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog (public)
    // ─────────────────────────────────────────────────────────────────────

    /// One page of the product catalog.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] on backend errors.
    pub async fn products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
        let key = CacheKey::Products { page, size };
        if let Some(CacheValue::Products(cached)) = self.inner.catalog.get(&key).await {
            return Ok(cached);
        }

        let envelope: Envelope<Page<Product>> = self
            .inner
            .gateway
            .send(Method::GET, "/open/products", Access::Public, &paging(page, size))
            .await?;
        let products = require_data(envelope, "product page")?;

        self.inner
            .catalog
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// A single product by ID.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] (404) for unknown products.
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(cached)) = self.inner.catalog.get(&key).await {
            return Ok(*cached);
        }

        let envelope: Envelope<Product> = self
            .inner
            .gateway
            .send(
                Method::GET,
                &format!("/open/products/{id}"),
                Access::Public,
                &[],
            )
            .await?;
        let product = require_data(envelope, "product")?;

        self.inner
            .catalog
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// One page of products in a category.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] on backend errors.
    pub async fn products_by_category(
        &self,
        category: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError> {
        let key = CacheKey::Category {
            name: category.to_owned(),
            page,
            size,
        };
        if let Some(CacheValue::Products(cached)) = self.inner.catalog.get(&key).await {
            return Ok(cached);
        }

        let envelope: Envelope<Page<Product>> = self
            .inner
            .gateway
            .send(
                Method::GET,
                &format!("/open/products/category/{category}"),
                Access::Public,
                &paging(page, size),
            )
            .await?;
        let products = require_data(envelope, "product page")?;

        self.inner
            .catalog
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shopping cart (protected)
    // ─────────────────────────────────────────────────────────────────────

    /// The lines currently in the cart.
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn cart_items(&self) -> Result<Vec<CartItem>, ApiError> {
        let envelope: Envelope<Vec<CartItem>> = self
            .inner
            .gateway
            .send(Method::GET, "/shopping-cart/items", Access::Protected, &[])
            .await?;
        require_data(envelope, "cart items")
    }

    /// Add a product to the cart. Returns the backend's message.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] when stock is insufficient.
    pub async fn add_to_cart(&self, product: ProductId, quantity: u32) -> Result<String, ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .inner
            .gateway
            .send(
                Method::POST,
                &format!("/shopping-cart/add-product/{product}"),
                Access::Protected,
                &[("quantity", quantity.to_string())],
            )
            .await?;
        Ok(envelope.message)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] when stock is insufficient.
    pub async fn update_quantity(
        &self,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let _: Envelope<serde_json::Value> = self
            .inner
            .gateway
            .send(
                Method::POST,
                &format!("/shopping-cart/update-product-quantity/{product}"),
                Access::Protected,
                &[("quantity", quantity.to_string())],
            )
            .await?;
        Ok(())
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn remove_from_cart(&self, product: ProductId) -> Result<(), ApiError> {
        let _: Envelope<serde_json::Value> = self
            .inner
            .gateway
            .send(
                Method::DELETE,
                &format!("/shopping-cart/remove-product/{product}"),
                Access::Protected,
                &[],
            )
            .await?;
        Ok(())
    }

    /// Remove every line from the cart.
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn empty_cart(&self) -> Result<(), ApiError> {
        let _: Envelope<serde_json::Value> = self
            .inner
            .gateway
            .send(
                Method::POST,
                "/shopping-cart/empty-cart",
                Access::Protected,
                &[],
            )
            .await?;
        Ok(())
    }

    /// Number of items in the cart (for the header badge).
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn cart_count(&self) -> Result<u64, ApiError> {
        let envelope: Envelope<u64> = self
            .inner
            .gateway
            .send(Method::POST, "/shopping-cart/count", Access::Protected, &[])
            .await?;
        require_data(envelope, "cart count")
    }

    /// Total amount of the cart.
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn cart_total(&self) -> Result<Price, ApiError> {
        let envelope: Envelope<Price> = self
            .inner
            .gateway
            .send(Method::POST, "/shopping-cart/total", Access::Protected, &[])
            .await?;
        require_data(envelope, "cart total")
    }

    /// Turn the cart into an order shipped to the profile's address.
    ///
    /// A success reply that carries no usable order record fails with
    /// [`ApiError::MalformedResponse`]; callers must not proceed to the
    /// confirmation view in that case.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] when the cart is empty or
    /// stock ran out.
    pub async fn checkout(&self) -> Result<Order, ApiError> {
        let envelope: Envelope<Order> = self
            .inner
            .gateway
            .send(
                Method::POST,
                "/shopping-cart/checkout",
                Access::Protected,
                &[],
            )
            .await?;
        require_data(envelope, "order")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Profile (protected)
    // ─────────────────────────────────────────────────────────────────────

    /// The authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let envelope: Envelope<UserProfile> = self
            .inner
            .gateway
            .send(Method::GET, "/users/me", Access::Protected, &[])
            .await?;
        require_data(envelope, "user profile")
    }

    /// Update the authenticated user's profile. Returns the backend's
    /// confirmation message.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::RequestFailed`] on validation errors.
    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<String, ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .inner
            .gateway
            .send_json(Method::PATCH, "/users/me", Access::Protected, update)
            .await?;
        Ok(envelope.message)
    }

    /// One page of the authenticated user's order history.
    ///
    /// # Errors
    ///
    /// Fails with an authentication kind when the session is missing or
    /// expired.
    pub async fn my_orders(&self, page: u32, size: u32) -> Result<Page<Order>, ApiError> {
        let envelope: Envelope<Page<Order>> = self
            .inner
            .gateway
            .send(
                Method::GET,
                "/users/me/orders",
                Access::Protected,
                &paging(page, size),
            )
            .await?;
        require_data(envelope, "order page")
    }
}

/// Standard pagination query parameters.
fn paging(page: u32, size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", size.to_string())]
}

/// A 2xx reply without a usable payload is a protocol violation.
fn require_data<T>(envelope: Envelope<T>, what: &str) -> Result<T, ApiError> {
    envelope
        .data
        .ok_or_else(|| ApiError::MalformedResponse(format!("success reply missing {what}")))
}
