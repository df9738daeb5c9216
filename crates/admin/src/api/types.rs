//! Wire types for the ordering backend's management endpoints.
//!
//! Field names mirror the backend's JSON exactly (Spanish catalog/order
//! resources, English user resource). Converted to `cantina-core` domain
//! types at the client boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cantina_core::{OrderStatus, UserRole};

/// A category as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCategory {
    pub id: i32,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(rename = "urlImagen")]
    pub url_imagen: Option<String>,
}

/// The category reference embedded in a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCategoryRef {
    pub id: i32,
    pub nombre: String,
}

/// A product as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: i32,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub stock: u32,
    pub activo: bool,
    #[serde(rename = "urlImagen")]
    pub url_imagen: Option<String>,
    pub categoria: ApiCategoryRef,
}

/// Category create/update payload.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPayload {
    pub nombre: String,
    pub descripcion: String,
    #[serde(rename = "urlImagen")]
    pub url_imagen: String,
}

/// Product create/update payload.
///
/// The active flag is NOT part of this payload: the backend exposes a
/// dedicated toggle endpoint for it, and newly created products are active
/// by default.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub nombre: String,
    pub descripcion: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub stock: u32,
    #[serde(rename = "categoriaId")]
    pub categoria_id: i32,
    #[serde(rename = "urlImagen")]
    pub url_imagen: String,
}

/// One line of a placed order.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOrderLine {
    pub id: i32,
    pub cantidad: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub producto: ApiProduct,
}

/// A placed order as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOrder {
    pub id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub estado: OrderStatus,
    /// Timestamp string; format varies, parsed in conversions.
    pub fecha: String,
    #[serde(rename = "detallePedidos")]
    pub detalle_pedidos: Vec<ApiOrderLine>,
    pub usuario: Option<ApiUser>,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(rename = "metodoPago", default)]
    pub metodo_pago: String,
    #[serde(default)]
    pub notas: String,
}

/// Order status transition payload.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub estado: OrderStatus,
}

/// A user as the backend's auth endpoints serialize it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub roles: UserRole,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_payload_wire_shape() {
        let payload = CategoryPayload {
            nombre: "Bebidas".to_owned(),
            descripcion: "Frías y calientes".to_owned(),
            url_imagen: "https://cdn.example.com/bebidas.png".to_owned(),
        };

        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["urlImagen"], "https://cdn.example.com/bebidas.png");
        assert!(json.get("url_imagen").is_none());
    }

    #[test]
    fn test_product_payload_wire_shape() {
        let payload = ProductPayload {
            nombre: "Licuado".to_owned(),
            descripcion: "De banana".to_owned(),
            precio: Decimal::new(800, 0),
            stock: 12,
            categoria_id: 2,
            url_imagen: String::new(),
        };

        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["categoriaId"], 2);
        assert!(json["precio"].is_number());
        // No active flag: the toggle endpoint owns it.
        assert!(json.get("activo").is_none());
    }

    #[test]
    fn test_status_update_uses_wire_constant() {
        let payload = StatusUpdate {
            estado: OrderStatus::Confirmed,
        };
        assert_eq!(
            serde_json::to_value(&payload).expect("serialize")["estado"],
            "CONFIRMADO"
        );
    }

    #[test]
    fn test_order_with_customer_deserializes() {
        let order: ApiOrder = serde_json::from_value(json!({
            "id": 4,
            "total": 1300.0,
            "estado": "CONFIRMADO",
            "fecha": "2025-11-01T10:00:00",
            "detallePedidos": [],
            "usuario": {
                "id": 2,
                "name": "Ana",
                "lastname": "García",
                "username": "anag",
                "email": "ana@example.com",
                "roles": "CLIENTE"
            },
            "telefono": "555-0101",
            "direccion": "Calle 1",
            "metodoPago": "TARJETA",
            "notas": "sin sal"
        }))
        .expect("deserialize");

        assert_eq!(order.usuario.expect("usuario").name, "Ana");
    }
}
