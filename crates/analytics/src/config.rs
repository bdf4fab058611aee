//! Analytics configuration loaded from environment variables.

use std::str::FromStr;

use domain::{ItemRule, OrderItem, ValidationPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What `totalItems` and `averageItemsPerOrder` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCountMode {
    /// Sum of item quantities.
    #[default]
    Quantity,
    /// Number of line items.
    LineItems,
}

impl ItemCountMode {
    /// Returns how much `item` adds to the item count.
    pub fn weight(&self, item: &OrderItem) -> f64 {
        match self {
            ItemCountMode::Quantity => item.quantity,
            ItemCountMode::LineItems => 1.0,
        }
    }
}

/// Returned when an item count mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown item count mode: {0} (expected \"quantity\" or \"line_items\")")]
pub struct UnknownItemCountMode(pub String);

impl FromStr for ItemCountMode {
    type Err = UnknownItemCountMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantity" | "quantities" => Ok(ItemCountMode::Quantity),
            "line_items" | "lines" => Ok(ItemCountMode::LineItems),
            other => Err(UnknownItemCountMode(other.to_string())),
        }
    }
}

/// Aggregation policy with sensible defaults.
///
/// Reads from environment variables:
/// - `ANALYTICS_ITEM_RULE`: `strict` or `non_negative` (default: `strict`)
/// - `ANALYTICS_ITEM_COUNT`: `quantity` or `line_items` (default: `quantity`)
/// - `ANALYTICS_COUNT_EMPTY_ORDERS`: whether orders without countable items
///   still count as orders (default: `true`)
/// - `ANALYTICS_REQUIRE_ITEM_TIMESTAMP`: drop items lacking `created_at`
///   (default: `false`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub item_rule: ItemRule,
    pub item_count: ItemCountMode,
    pub count_empty_orders: bool,
    pub require_item_timestamp: bool,
}

impl AnalyticsConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            item_rule: lookup("ANALYTICS_ITEM_RULE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.item_rule),
            item_count: lookup("ANALYTICS_ITEM_COUNT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.item_count),
            count_empty_orders: lookup("ANALYTICS_COUNT_EMPTY_ORDERS")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.count_empty_orders),
            require_item_timestamp: lookup("ANALYTICS_REQUIRE_ITEM_TIMESTAMP")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.require_item_timestamp),
        }
    }

    /// Returns the record validation policy implied by this configuration.
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy::default()
            .with_item_rule(self.item_rule)
            .with_item_timestamp_required(self.require_item_timestamp)
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            item_rule: ItemRule::Strict,
            item_count: ItemCountMode::Quantity,
            count_empty_orders: true,
            require_item_timestamp: false,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
