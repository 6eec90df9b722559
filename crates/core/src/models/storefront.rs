use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MOCK_ORDER_UNIT_PRICE;

/// 演示商城商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// 静态资源标识
    pub image: String,
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub stock: i32,
}

impl NewProduct {
    pub fn new(name: &str, description: &str, price: f64, image: &str, stock: i32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: image.to_string(),
            stock,
        }
    }
}

impl Product {
    pub fn from_new(id: i64, product: &NewProduct) -> Self {
        Self {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            stock: product.stock,
        }
    }
}

/// 订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
}

text_enum!(OrderStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
});

/// 下单条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl Order {
    /// 订单金额按固定单价估算，不读取商品实际价格
    pub fn total_for(items: &[OrderItem]) -> f64 {
        items
            .iter()
            .map(|item| item.quantity as f64 * MOCK_ORDER_UNIT_PRICE)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_uses_mock_price() {
        let items = vec![
            OrderItem { product_id: 1, quantity: 2 },
            OrderItem { product_id: 3, quantity: 1 },
        ];
        assert_eq!(Order::total_for(&items), 30.0);
        assert_eq!(Order::total_for(&[]), 0.0);
    }

    #[test]
    fn test_order_item_deserializes_camel_case() {
        let item: OrderItem = serde_json::from_str(r#"{"productId": 4, "quantity": 5}"#).unwrap();
        assert_eq!(item.product_id, 4);
        assert_eq!(item.quantity, 5);
    }
}
