//! Shared harness for storefront client integration tests.
//!
//! Each test gets a [`MockBackend`]: a wiremock server plus a client wired
//! against it with a short redirect delay. Tests mount the backend replies
//! they need and drive full user journeys through the typed client.
//!
//! Run with: `cargo test -p deportes-elite-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use deportes_elite_client::{ApiConfig, CredentialStore, StorefrontClient};
use serde_json::{Value, json};
use wiremock::MockServer;

/// A mock backend and a client pointed at it.
pub struct MockBackend {
    pub server: MockServer,
    pub client: StorefrontClient,
    pub store: Arc<dyn CredentialStore>,
}

impl MockBackend {
    /// Start a mock backend with the given credential store.
    pub async fn with_store(store: Arc<dyn CredentialStore>) -> Self {
        let server = MockServer::start().await;
        let config =
            ApiConfig::for_base_url(&server.uri()).expect("mock server uri must parse");
        let client = StorefrontClient::builder(config)
            .credential_store(Arc::clone(&store))
            .redirect_delay(std::time::Duration::from_millis(10))
            .build();
        Self {
            server,
            client,
            store,
        }
    }

    /// Start a mock backend with a fresh in-memory credential store.
    pub async fn start() -> Self {
        Self::with_store(Arc::new(
            deportes_elite_client::MemoryCredentialStore::new(),
        ))
        .await
    }

    /// Build a second client against the same backend and store, standing
    /// in for a separate process picking up a persisted session.
    pub fn another_client(&self) -> StorefrontClient {
        let config =
            ApiConfig::for_base_url(&self.server.uri()).expect("mock server uri must parse");
        StorefrontClient::builder(config)
            .credential_store(Arc::clone(&self.store))
            .redirect_delay(std::time::Duration::from_millis(10))
            .build()
    }
}

/// The `{ message, data }` reply wrapper the backend uses.
#[must_use]
pub fn envelope(message: &str, data: Value) -> Value {
    json!({ "message": message, "data": data })
}

/// A reply wrapper with the payload omitted, as the backend does for null.
#[must_use]
pub fn message_only(message: &str) -> Value {
    json!({ "message": message })
}

/// A single-page pagination wrapper around the given records.
#[must_use]
pub fn single_page(content: Vec<Value>) -> Value {
    let len = content.len();
    json!({
        "content": content,
        "totalPages": 1,
        "totalElements": len,
        "size": 20,
        "number": 0,
        "numberOfElements": len,
        "first": true,
        "last": true,
        "empty": len == 0,
    })
}

/// A catalog product record in the backend's wire shape.
#[must_use]
pub fn product_json(id: i64, description: &str, price: f64, stock: u32) -> Value {
    json!({
        "id": id,
        "descripcion": description,
        "monto": price,
        "cantidadDisponible": stock,
        "rutaImagen": format!("/images/{id}.jpg"),
        "categoria": { "id": 1, "nombre": "Fútbol" }
    })
}

/// A cart line record in the backend's wire shape.
#[must_use]
pub fn cart_item_json(id: i64, product: Value, quantity: u32, unit_price: f64) -> Value {
    json!({
        "id": id,
        "producto": product,
        "cantidad": quantity,
        "precioUnitario": unit_price,
    })
}

/// An order record in the backend's wire shape.
#[must_use]
pub fn order_json(id: i64, order_number: &str, total: f64, items: Vec<Value>) -> Value {
    json!({
        "id": id,
        "numeroOrden": order_number,
        "fechaCreacion": "2024-05-11T14:30:00",
        "total": total,
        "direccionEnvio": "Calle Falsa 123",
        "estado": "PENDIENTE",
        "items": items,
    })
}
