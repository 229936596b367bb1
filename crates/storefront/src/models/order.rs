//! Customer orders with their line items.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use storehaus_core::{Currency, OrderId, OrderItemId, OrderStatus, ProductId, VariantId};

/// An order as shown in the customer's account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub currency: Currency,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A line item with its variant and product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub variant: OrderItemVariant,
}

/// Variant as referenced from a line item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemVariant {
    pub id: VariantId,
    pub name: String,
    pub sku: String,
    pub product: OrderItemProduct,
}

/// Product as referenced from a line item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

/// Attach line items to their orders, keeping the order sequence.
///
/// Items whose order is not in `orders` are dropped.
#[must_use]
pub fn attach_items(mut orders: Vec<Order>, items: Vec<(OrderId, OrderItem)>) -> Vec<Order> {
    let index: HashMap<OrderId, usize> = orders
        .iter()
        .enumerate()
        .map(|(pos, order)| (order.id, pos))
        .collect();

    for (order_id, item) in items {
        if let Some(order) = index.get(&order_id).and_then(|&pos| orders.get_mut(pos)) {
            order.items.push(item);
        }
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i32) -> Order {
        Order {
            id: OrderId::new(id),
            status: OrderStatus::Paid,
            total_amount: Decimal::new(3000, 2),
            currency: Currency::Usd,
            tracking_number: None,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    fn item(id: i32, quantity: i32) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(id),
            quantity,
            unit_price: Decimal::new(1000, 2),
            variant: OrderItemVariant {
                id: VariantId::new(1),
                name: "M".to_string(),
                sku: "TEE-M".to_string(),
                product: OrderItemProduct {
                    id: ProductId::new(1),
                    name: "Linen Tee".to_string(),
                    slug: "linen-tee".to_string(),
                    image_url: None,
                },
            },
        }
    }

    #[test]
    fn test_attach_items_groups_by_order() {
        let orders = attach_items(
            vec![order(2), order(1)],
            vec![
                (OrderId::new(1), item(10, 3)),
                (OrderId::new(2), item(11, 1)),
                (OrderId::new(1), item(12, 2)),
                (OrderId::new(99), item(13, 7)),
            ],
        );

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId::new(2));
        assert_eq!(orders[0].items.len(), 1);
        assert_eq!(orders[1].items.len(), 2);
        let quantities: Vec<i32> = orders[1].items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, [3, 2]);
    }
}
