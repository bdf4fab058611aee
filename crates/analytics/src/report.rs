use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Revenue and volume totals over a batch of orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of `price * quantity` over countable items of counted orders.
    pub total_revenue: f64,
    /// `total_revenue / order_count`, or 0 when no orders were counted.
    pub average_order_value: f64,
    /// Item volume; quantities or line items depending on configuration.
    /// Always serialized as a JSON float (`4.0`, not `4`) so fractional
    /// quantities survive.
    pub total_items: f64,
    pub order_count: u64,
}

/// Status histogram and basket size over a batch of orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub total_orders: u64,
    pub status_counts: BTreeMap<String, u64>,
    pub average_items_per_order: f64,
}

/// Revenue summed per calendar bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByPeriod {
    pub period: Period,
    /// Bucket key to revenue, in ascending key order.
    pub buckets: BTreeMap<String, f64>,
    /// Orders left out because their `created_at` was not a usable timestamp.
    pub skipped_orders: u64,
}

impl RevenueByPeriod {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            buckets: BTreeMap::new(),
            skipped_orders: 0,
        }
    }

    /// Returns the revenue recorded under `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.buckets.get(key).copied()
    }

    /// Returns the sum over all buckets.
    pub fn total(&self) -> f64 {
        self.buckets.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_serialize_camel_case() {
        let totals = OrderTotals {
            total_revenue: 450.0,
            average_order_value: 150.0,
            total_items: 4.0,
            order_count: 3,
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["totalRevenue"], 450.0);
        assert_eq!(json["averageOrderValue"], 150.0);
        assert_eq!(json["totalItems"], 4.0);
        assert_eq!(json["orderCount"], 3);
    }

    #[test]
    fn test_empty_statistics_serialize_with_empty_map() {
        let json = serde_json::to_value(OrderStatistics::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalOrders": 0,
                "statusCounts": {},
                "averageItemsPerOrder": 0.0
            })
        );
    }
}
