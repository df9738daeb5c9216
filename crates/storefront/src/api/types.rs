//! Wire types for the ordering backend.
//!
//! Field names mirror the backend's JSON exactly. The catalog and order
//! resources use Spanish names while the user resource uses English ones -
//! the upstream API is mixed-language and these types reproduce it
//! faithfully rather than papering over it. Everything is converted to the
//! domain types in `cantina-core` before leaving this module's parent.

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

/// Order-creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "detallePedidos")]
    pub detalle_pedidos: Vec<OrderLineCreate>,
    pub telefono: String,
    pub direccion: String,
    #[serde(rename = "metodoPago")]
    pub metodo_pago: String,
    pub notas: String,
    #[serde(rename = "usuarioId")]
    pub usuario_id: i32,
}

/// Line of an order-creation payload.
///
/// Note the snake_case `producto_id`: the backend's order endpoint really is
/// inconsistent with the camelCase used elsewhere.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineCreate {
    pub cantidad: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub producto_id: i32,
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

/// Signup request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_deserializes_backend_shape() {
        let product: ApiProduct = serde_json::from_value(json!({
            "id": 3,
            "nombre": "Milanesa",
            "descripcion": "Con papas",
            "precio": 1200.5,
            "stock": 7,
            "activo": true,
            "urlImagen": "https://cdn.example.com/mila.png",
            "categoria": {"id": 1, "nombre": "Comidas"}
        }))
        .expect("deserialize");

        assert_eq!(product.nombre, "Milanesa");
        assert_eq!(product.precio, Decimal::new(12005, 1));
        assert_eq!(product.categoria.id, 1);
    }

    #[test]
    fn test_order_create_serializes_backend_shape() {
        let payload = OrderCreate {
            total: Decimal::new(1750, 0),
            detalle_pedidos: vec![OrderLineCreate {
                cantidad: 2,
                subtotal: Decimal::new(1250, 0),
                producto_id: 3,
            }],
            telefono: "555-0100".to_owned(),
            direccion: "Av. Siempre Viva 742".to_owned(),
            metodo_pago: "EFECTIVO".to_owned(),
            notas: String::new(),
            usuario_id: 9,
        };

        let json = serde_json::to_value(&payload).expect("serialize");
        assert!(json["detallePedidos"].is_array());
        assert_eq!(json["detallePedidos"][0]["producto_id"], 3);
        assert_eq!(json["metodoPago"], "EFECTIVO");
        assert_eq!(json["usuarioId"], 9);
        assert!(json["total"].is_number());
    }

    #[test]
    fn test_order_deserializes_backend_shape() {
        let order: ApiOrder = serde_json::from_value(json!({
            "id": 12,
            "total": 1750.0,
            "estado": "PENDIENTE",
            "fecha": "2025-11-02T18:30:00",
            "detallePedidos": [{
                "id": 1,
                "cantidad": 2,
                "subtotal": 1250.0,
                "producto": {
                    "id": 3,
                    "nombre": "Milanesa",
                    "precio": 625.0,
                    "stock": 7,
                    "activo": true,
                    "urlImagen": null,
                    "categoria": {"id": 1, "nombre": "Comidas"}
                }
            }],
            "usuario": null,
            "telefono": "555-0100",
            "direccion": "Av. Siempre Viva 742",
            "metodoPago": "EFECTIVO",
            "notas": ""
        }))
        .expect("deserialize");

        assert_eq!(order.estado, OrderStatus::Pending);
        assert_eq!(order.detalle_pedidos.len(), 1);
    }
}
