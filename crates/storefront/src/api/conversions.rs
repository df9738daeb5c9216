//! Conversions from backend wire types to domain types.

use chrono::{DateTime, NaiveDateTime, Utc};

use cantina_core::{
    Category, CategoryId, Order, OrderCustomer, OrderId, OrderLine, OrderLineId, Product,
    ProductId, UserId,
};

use super::ApiError;
use super::types::{ApiCategory, ApiOrder, ApiOrderLine, ApiProduct, ApiUser};

/// Parse the backend's `fecha` field.
///
/// The backend emits local timestamps without a zone designator; full
/// RFC 3339 values are accepted too and normalized to UTC.
fn parse_fecha(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ApiError::Data(format!("unparseable order timestamp {raw:?}: {e}")))
}

pub fn convert_category(category: ApiCategory) -> Category {
    Category {
        id: CategoryId::new(category.id),
        name: category.nombre,
        description: category.descripcion,
        image_url: category.url_imagen,
    }
}

pub fn convert_product(product: ApiProduct) -> Product {
    Product {
        id: ProductId::new(product.id),
        name: product.nombre,
        description: product.descripcion,
        price: product.precio,
        image_url: product.url_imagen,
        category_id: CategoryId::new(product.categoria.id),
        category_name: product.categoria.nombre,
        stock: product.stock,
        active: product.activo,
    }
}

fn convert_order_line(line: ApiOrderLine) -> OrderLine {
    OrderLine {
        id: OrderLineId::new(line.id),
        quantity: line.cantidad,
        subtotal: line.subtotal,
        product_id: ProductId::new(line.producto.id),
        product_name: line.producto.nombre,
    }
}

fn convert_customer(user: ApiUser) -> OrderCustomer {
    OrderCustomer {
        id: UserId::new(user.id),
        name: user.name,
        email: user.email,
    }
}

/// Convert a wire order, parsing its timestamp.
///
/// # Errors
///
/// Returns [`ApiError::Data`] if the backend's timestamp is unparseable.
pub fn convert_order(order: ApiOrder) -> Result<Order, ApiError> {
    let placed_at = parse_fecha(&order.fecha)?;

    Ok(Order {
        id: OrderId::new(order.id),
        total: order.total,
        status: order.estado,
        placed_at,
        lines: order
            .detalle_pedidos
            .into_iter()
            .map(convert_order_line)
            .collect(),
        customer: order.usuario.map(convert_customer),
        phone: order.telefono,
        address: order.direccion,
        payment_method: order.metodo_pago,
        notes: order.notas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_fecha_naive() {
        let dt = parse_fecha("2025-11-02T18:30:00").expect("parse");
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_fecha_with_fraction() {
        assert!(parse_fecha("2025-11-02T18:30:00.123").is_ok());
    }

    #[test]
    fn test_parse_fecha_rfc3339() {
        assert!(parse_fecha("2025-11-02T18:30:00Z").is_ok());
        assert!(parse_fecha("2025-11-02T18:30:00-03:00").is_ok());
    }

    #[test]
    fn test_parse_fecha_garbage() {
        assert!(matches!(
            parse_fecha("ayer a la tarde"),
            Err(ApiError::Data(_))
        ));
    }
}
