//! Order and line-item records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};

use super::{CustomerId, ItemId, ItemRule, OrderStatus, ProductId};

/// One product line within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ItemId,
    pub product_id: ProductId,
    /// Units ordered. Only positive quantities count under the strict rule.
    pub quantity: f64,
    /// Price per unit.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl OrderItem {
    /// Creates a new line item without a creation timestamp.
    pub fn new(
        id: impl Into<ItemId>,
        product_id: impl Into<ProductId>,
        quantity: f64,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            quantity,
            price,
            created_at: None,
        }
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Returns `price * quantity`.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }

    /// Returns true if the item's quantity and price satisfy `rule`.
    pub fn is_countable(&self, rule: ItemRule) -> bool {
        rule.admits(self.quantity, self.price)
    }
}

/// A customer purchase record.
///
/// Orders are owned by the caller; aggregation only ever borrows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// ISO-8601 timestamp as stored.
    pub created_at: String,
    /// ISO-8601 timestamp as stored.
    pub updated_at: String,
}

impl Order {
    /// Creates an order with no items.
    pub fn new(
        id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
        total_amount: f64,
        status: impl Into<OrderStatus>,
        created_at: impl Into<String>,
    ) -> Self {
        let created_at = created_at.into();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            total_amount,
            status: status.into(),
            items: Vec::new(),
            updated_at: created_at.clone(),
            created_at,
        }
    }

    /// Appends a line item.
    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Returns the items that satisfy `rule`.
    pub fn countable_items(&self, rule: ItemRule) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(move |item| item.is_countable(rule))
    }

    /// Returns the summed line totals of the countable items.
    pub fn revenue(&self, rule: ItemRule) -> f64 {
        self.countable_items(rule).map(OrderItem::line_total).sum()
    }

    /// Returns the status key used for histograms.
    ///
    /// An empty status string is reported as `"unknown"`.
    pub fn status_key(&self) -> &str {
        match self.status.as_str() {
            "" => "unknown",
            s => s,
        }
    }

    /// Parses `created_at` into a UTC instant, if it is a recognizable timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Parses an ISO-8601 timestamp string as UTC.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`, with offset), a naive
/// date-time without offset, or a bare calendar date. Offset-less values are
/// taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_line_total() {
        let item = OrderItem::new("item-1", "SKU-001", 3.0, 10.0);
        assert_eq!(item.line_total(), 30.0);
    }

    #[test]
    fn test_countable_items_follow_rule() {
        let order = Order::new("order-1", "customer-1", 0.0, "pending", "2024-01-01")
            .with_item(OrderItem::new("a", "SKU-A", 1.0, 50.0))
            .with_item(OrderItem::new("b", "SKU-B", 0.0, 25.0))
            .with_item(OrderItem::new("c", "SKU-C", 1.0, -10.0));

        assert_eq!(order.countable_items(ItemRule::Strict).count(), 1);
        assert_eq!(order.countable_items(ItemRule::NonNegative).count(), 2);
        assert_eq!(order.revenue(ItemRule::Strict), 50.0);
    }

    #[test]
    fn test_status_key_defaults_to_unknown() {
        let order = Order::new("order-1", "customer-1", 0.0, "", "2024-01-01");
        assert_eq!(order.status_key(), "unknown");

        let order = Order::new("order-2", "customer-1", 0.0, "shipped", "2024-01-01");
        assert_eq!(order.status_key(), "shipped");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-03-10T23:30:00-02:00").unwrap();
        assert_eq!(dt.day(), 11);
        assert_eq!(dt.hour(), 1);
    }

    #[test]
    fn test_parse_naive_and_date_only() {
        let dt = parse_timestamp("2024-01-01T12:00:00.250").unwrap();
        assert_eq!(dt.hour(), 12);

        let dt = parse_timestamp("2024-02-29").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (2, 29, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-01").is_none());
    }

    #[test]
    fn test_order_deserializes_without_items() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "order-1",
            "customer_id": "customer-1",
            "total_amount": 10.5,
            "status": "completed",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.status, OrderStatus::Completed);
    }
}
