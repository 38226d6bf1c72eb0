//! Records mirroring the backend entities.
//!
//! The backend owns identity and consistency for all of these; the client
//! treats them as immutable snapshots to render. Wire field names are the
//! backend's Spanish names, mapped here via serde renames.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{
    CartItemId, CategoryId, Email, OrderId, OrderItemId, Price, ProductId, UserId,
};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "monto")]
    pub price: Price,
    #[serde(rename = "cantidadDisponible")]
    pub stock: u32,
    #[serde(rename = "rutaImagen")]
    pub image_path: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<Category>,
}

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    #[serde(rename = "producto")]
    pub product: Product,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario")]
    pub unit_price: Price,
}

impl CartItem {
    /// Line subtotal (unit price times quantity).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::new(self.unit_price.amount() * rust_decimal::Decimal::from(self.quantity))
    }
}

/// Order lifecycle states, as the backend names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pendiente,
    Confirmada,
    EnProceso,
    Enviada,
    Entregada,
    Cancelada,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "numeroOrden")]
    pub order_number: String,
    #[serde(rename = "fechaCreacion")]
    pub created_at: NaiveDateTime,
    pub total: Price,
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    /// Lines are not embedded in every reply; default to empty.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// A line in a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    #[serde(rename = "producto")]
    pub product: Product,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario")]
    pub unit_price: Price,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: Email,
    #[serde(rename = "direccionEnvio")]
    pub shipping_address: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_wire_names() {
        let json = serde_json::json!({
            "id": 3,
            "descripcion": "Camiseta Técnica Transpirable",
            "monto": 24.99,
            "cantidadDisponible": 150,
            "rutaImagen": "/shirt.jpg",
            "categoria": { "id": 1, "nombre": "Ropa" }
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Price::new(Decimal::new(2499, 2)));
        assert_eq!(product.stock, 150);
        assert_eq!(product.category.unwrap().name, "Ropa");
    }

    #[test]
    fn test_cart_item_subtotal() {
        let json = serde_json::json!({
            "id": 1,
            "producto": {
                "id": 1,
                "descripcion": "Balón de Fútbol Profesional",
                "monto": 49.99,
                "cantidadDisponible": 100,
                "rutaImagen": "/ball.jpg",
                "categoria": null
            },
            "cantidad": 3,
            "precioUnitario": 49.99
        });

        let item: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.subtotal(), Price::new(Decimal::new(14997, 2)));
    }

    #[test]
    fn test_order_without_items() {
        let json = serde_json::json!({
            "id": 10,
            "numeroOrden": "ORD-2024-0010",
            "fechaCreacion": "2024-05-11T14:30:00",
            "total": 99.98,
            "direccionEnvio": "Calle Falsa 123",
            "estado": "PENDIENTE"
        });

        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pendiente);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_order_status_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"EN_PROCESO\"").unwrap();
        assert_eq!(status, OrderStatus::EnProceso);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Entregada).unwrap(),
            "\"ENTREGADA\""
        );
    }
}
