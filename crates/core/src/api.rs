//! Wire envelopes and request bodies for the backend API.
//!
//! Every successful backend reply is an [`Envelope`] holding a
//! human-readable message and a typed payload. The backend omits `null`
//! payloads entirely, so `data` is optional on the wire even for
//! operations that normally return one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The `{ message, data }` wrapper every backend response uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Spring-style pagination envelope.
///
/// Only the paging metadata the client renders is modeled; the backend
/// sends more (`pageable`, sort flags) which is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    pub size: u32,
    pub number: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

/// Body for `POST /open/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// Body for `POST /open/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
}

/// Body for `PATCH /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let json = r#"{"message":"Items in cart","data":[1,2,3]}"#;
        let env: Envelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert_eq!(env.message, "Items in cart");
        assert_eq!(env.data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_envelope_without_data() {
        // The backend drops null payloads from the body entirely.
        let json = r#"{"message":"Cart emptied"}"#;
        let env: Envelope<String> = serde_json::from_str(json).unwrap();
        assert_eq!(env.message, "Cart emptied");
        assert!(env.data.is_none());
    }

    #[test]
    fn test_page_metadata() {
        let json = serde_json::json!({
            "content": ["a", "b"],
            "totalPages": 5,
            "totalElements": 98,
            "size": 20,
            "number": 0,
            "numberOfElements": 2,
            "first": true,
            "last": false,
            "empty": false,
            "pageable": { "offset": 0 }
        });

        let page: Page<String> = serde_json::from_value(json).unwrap();
        assert_eq!(page.content, vec!["a", "b"]);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_elements, 98);
        assert!(page.first);
        assert!(!page.last);
    }

    #[test]
    fn test_register_request_wire_names() {
        let request = RegisterRequest {
            first_name: "Ana".to_owned(),
            last_name: "García".to_owned(),
            email: "ana@example.com".to_owned(),
            password: "contraseña-larga".to_owned(),
            shipping_address: "Calle Falsa 123".to_owned(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["apellido"], "García");
        assert_eq!(json["direccionEnvio"], "Calle Falsa 123");
        assert_eq!(json["fechaNacimiento"], "1990-04-02");
    }
}
