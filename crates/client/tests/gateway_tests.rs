//! HTTP-level tests for the authenticated request gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use deportes_elite_client::{
    ApiConfig, ApiError, CredentialStore, MemoryCredentialStore, SessionEvents, StorefrontClient,
};
use deportes_elite_core::AuthToken;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session event sink that records what fired.
#[derive(Debug, Default)]
struct RecordingEvents {
    notified: AtomicBool,
    redirected: AtomicBool,
}

impl SessionEvents for RecordingEvents {
    fn notify_session_expired(&self) {
        self.notified.store(true, Ordering::SeqCst);
    }

    fn redirect_to_login(&self) {
        self.redirected.store(true, Ordering::SeqCst);
    }
}

struct Harness {
    server: MockServer,
    client: StorefrontClient,
    store: Arc<MemoryCredentialStore>,
    events: Arc<RecordingEvents>,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let events = Arc::new(RecordingEvents::default());
    let config = ApiConfig::for_base_url(&server.uri()).expect("mock server uri");
    let client = StorefrontClient::builder(config)
        .credential_store(Arc::clone(&store) as Arc<dyn CredentialStore>)
        .session_events(Arc::clone(&events) as Arc<dyn SessionEvents>)
        .redirect_delay(Duration::from_millis(10))
        .build();
    Harness {
        server,
        client,
        store,
        events,
    }
}

fn product_json(id: i64, description: &str) -> serde_json::Value {
    json!({
        "id": id,
        "descripcion": description,
        "monto": 49.99,
        "cantidadDisponible": 100,
        "rutaImagen": "/ball.jpg",
        "categoria": { "id": 1, "nombre": "Fútbol" }
    })
}

fn page_json(products: Vec<serde_json::Value>, number: u32, total_pages: u32) -> serde_json::Value {
    let count = products.len();
    json!({
        "content": products,
        "totalPages": total_pages,
        "totalElements": 42,
        "size": 20,
        "number": number,
        "numberOfElements": count,
        "first": number == 0,
        "last": number + 1 == total_pages,
        "empty": count == 0
    })
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    let config =
        ApiConfig::for_base_url(&format!("{}/api", server.uri())).expect("prefixed uri");
    let client = StorefrontClient::builder(config).build();

    Mock::given(method("GET"))
        .and(path("/api/open/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Products",
            "data": page_json(vec![product_json(1, "Balón")], 0, 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.products(0, 20).await.expect("prefixed read");
    assert_eq!(page.content.len(), 1);
}

#[tokio::test]
async fn protected_call_without_credential_makes_no_request() {
    let h = harness().await;

    let result = h.client.cart_items().await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    let requests = h.server.received_requests().await.expect("recording on");
    assert!(requests.is_empty(), "no network call may be made");
    assert!(h.events.notified.load(Ordering::SeqCst));
}

#[tokio::test]
async fn public_call_without_credential_proceeds() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/open/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Products",
            "data": page_json(vec![product_json(1, "Balón")], 0, 1)
        })))
        .mount(&h.server)
        .await;

    let page = h.client.products(0, 20).await.expect("public read");
    assert_eq!(page.content.len(), 1);
    assert!(!h.events.notified.load(Ordering::SeqCst));
}

#[tokio::test]
async fn credential_attached_as_bearer_header() {
    let h = harness().await;
    h.store
        .store(&AuthToken::new("tok-123"))
        .expect("store credential");

    Mock::given(method("GET"))
        .and(path("/shopping-cart/items"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Items in cart",
            "data": []
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let items = h.client.cart_items().await.expect("authenticated read");
    assert!(items.is_empty());
}

#[tokio::test]
async fn expired_credential_is_cleared_and_redirect_scheduled() {
    let h = harness().await;
    h.store
        .store(&AuthToken::new("tok-stale"))
        .expect("store credential");

    Mock::given(method("GET"))
        .and(path("/shopping-cart/items"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let result = h.client.cart_items().await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(
        h.store.load().expect("readable store").is_none(),
        "credential must be cleared immediately"
    );
    assert!(h.events.notified.load(Ordering::SeqCst));
    // The redirect fires only after the configured delay.
    assert!(!h.events.redirected.load(Ordering::SeqCst));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.events.redirected.load(Ordering::SeqCst));
}

#[tokio::test]
async fn non_auth_failure_keeps_credential_and_carries_message() {
    let h = harness().await;
    h.store
        .store(&AuthToken::new("tok-valid"))
        .expect("store credential");

    Mock::given(method("POST"))
        .and(path("/shopping-cart/add-product/1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "No hay suficiente stock disponible"
        })))
        .mount(&h.server)
        .await;

    let result = h
        .client
        .add_to_cart(deportes_elite_core::ProductId::new(1), 5)
        .await;

    match result {
        Err(ApiError::RequestFailed { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "No hay suficiente stock disponible");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    let token = h.store.load().expect("readable store");
    assert_eq!(
        token.expect("credential must survive").expose(),
        "tok-valid"
    );
    assert!(!h.events.notified.load(Ordering::SeqCst));
}

#[tokio::test]
async fn failure_with_unparsable_body_defaults_to_empty_message() {
    let h = harness().await;
    h.store
        .store(&AuthToken::new("tok-valid"))
        .expect("store credential");

    Mock::given(method("POST"))
        .and(path("/shopping-cart/empty-cart"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&h.server)
        .await;

    match h.client.empty_cart().await {
        Err(ApiError::RequestFailed { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.is_empty());
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_envelope_payload_is_returned_unmodified() {
    let h = harness().await;
    h.store
        .store(&AuthToken::new("tok-valid"))
        .expect("store credential");

    let items = json!([{
        "id": 7,
        "producto": product_json(1, "Balón de Fútbol Profesional"),
        "cantidad": 2,
        "precioUnitario": 49.99
    }]);

    Mock::given(method("GET"))
        .and(path("/shopping-cart/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Items in cart",
            "data": items
        })))
        .mount(&h.server)
        .await;

    let cart = h.client.cart_items().await.expect("cart read");
    assert_eq!(cart.len(), 1);
    let line = cart.first().expect("one line");
    assert_eq!(line.id.as_i64(), 7);
    assert_eq!(line.quantity, 2);
    assert_eq!(line.product.description, "Balón de Fútbol Profesional");
}

#[tokio::test]
async fn pagination_pages_return_distinct_content() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/open/products"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Products",
            "data": page_json(vec![product_json(1, "Balón")], 0, 2)
        })))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/open/products"))
        .and(query_param("page", "1"))
        .and(query_param("size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Products",
            "data": page_json(vec![product_json(2, "Zapatillas")], 1, 2)
        })))
        .mount(&h.server)
        .await;

    let first = h.client.products(0, 20).await.expect("page 0");
    let second = h.client.products(1, 20).await.expect("page 1");

    assert_eq!(first.total_pages, 2);
    assert_ne!(first.content, second.content);
    assert!(first.first);
    assert!(second.last);
}

#[tokio::test]
async fn catalog_reads_are_served_from_cache() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/open/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Products",
            "data": page_json(vec![product_json(1, "Balón")], 0, 1)
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let first = h.client.products(0, 20).await.expect("first read");
    let second = h.client.products(0, 20).await.expect("cached read");
    assert_eq!(first, second);
}

#[tokio::test]
async fn malformed_success_body_is_classified() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/open/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&h.server)
        .await;

    let result = h.client.products(0, 20).await;
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}

#[tokio::test]
async fn login_stores_issued_token() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/open/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "data": { "token": "tok-fresh" }
        })))
        .mount(&h.server)
        .await;

    h.client
        .login("ana@example.com", "contraseña")
        .await
        .expect("login");

    let token = h.store.load().expect("readable store");
    assert_eq!(token.expect("stored credential").expose(), "tok-fresh");
    assert!(h.client.is_authenticated().expect("readable store"));
}

#[tokio::test]
async fn login_without_token_payload_is_malformed() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/open/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful"
        })))
        .mount(&h.server)
        .await;

    let result = h.client.login("ana@example.com", "contraseña").await;
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    assert!(h.store.load().expect("readable store").is_none());
}

#[tokio::test]
async fn checkout_without_order_payload_is_malformed() {
    let h = harness().await;
    h.store
        .store(&AuthToken::new("tok-valid"))
        .expect("store credential");

    Mock::given(method("POST"))
        .and(path("/shopping-cart/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Order created"
        })))
        .mount(&h.server)
        .await;

    let result = h.client.checkout().await;
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}
