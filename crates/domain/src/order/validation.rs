//! Per-record validation of untrusted order input.
//!
//! Input arrives as loosely shaped JSON. Each record is parsed into a typed
//! [`Order`] or rejected with an [`OrderRejection`]; a rejection only ever
//! excludes that one record.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{Order, OrderItem, OrderRejection, OrderStatus};

/// Value-range rule deciding whether a line item counts toward aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRule {
    /// Quantity must be greater than zero and price at least zero.
    #[default]
    Strict,
    /// Quantity and price must both be at least zero.
    NonNegative,
}

impl ItemRule {
    /// Returns true if an item with this quantity and price counts.
    ///
    /// Non-finite values never count.
    pub fn admits(&self, quantity: f64, price: f64) -> bool {
        if !quantity.is_finite() || !price.is_finite() {
            return false;
        }
        match self {
            ItemRule::Strict => quantity > 0.0 && price >= 0.0,
            ItemRule::NonNegative => quantity >= 0.0 && price >= 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemRule::Strict => "strict",
            ItemRule::NonNegative => "non_negative",
        }
    }
}

/// Returned when an item rule name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown item rule: {0} (expected \"strict\" or \"non_negative\")")]
pub struct UnknownItemRule(pub String);

impl FromStr for ItemRule {
    type Err = UnknownItemRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ItemRule::Strict),
            "non_negative" | "non-negative" | "lenient" => Ok(ItemRule::NonNegative),
            other => Err(UnknownItemRule(other.to_string())),
        }
    }
}

impl std::fmt::Display for ItemRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Controls how strictly records are checked.
///
/// The default is the plain structural check: every required field present
/// with the right type, items checked with [`ItemRule::Strict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub item_rule: ItemRule,
    /// When false, a missing `items` field parses as no items.
    pub require_items: bool,
    /// When true, items without a string `created_at` are dropped.
    pub require_item_timestamp: bool,
    /// When true, statuses outside the known set reject the order.
    pub require_known_status: bool,
    /// When true, a negative `total_amount` rejects the order.
    pub reject_negative_total: bool,
    /// When true, empty `id` / `customer_id` strings reject the order.
    pub require_non_empty_ids: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            item_rule: ItemRule::Strict,
            require_items: true,
            require_item_timestamp: false,
            require_known_status: false,
            reject_negative_total: false,
            require_non_empty_ids: false,
        }
    }
}

impl ValidationPolicy {
    /// Policy for bare order rows as stored, which carry no items.
    pub fn records() -> Self {
        Self {
            require_items: false,
            require_known_status: true,
            reject_negative_total: true,
            require_non_empty_ids: true,
            ..Self::default()
        }
    }

    /// Returns a copy using `rule` for items.
    pub fn with_item_rule(mut self, rule: ItemRule) -> Self {
        self.item_rule = rule;
        self
    }

    /// Returns a copy that drops items without a creation timestamp.
    pub fn with_item_timestamp_required(mut self, required: bool) -> Self {
        self.require_item_timestamp = required;
        self
    }
}

/// Structural check of an order record.
///
/// True iff `value` is an object with string `id`, `customer_id`, `status`,
/// `created_at` and `updated_at`, a numeric `total_amount`, and an `items`
/// array.
pub fn validate_order(value: &Value) -> bool {
    Order::from_value(value, &ValidationPolicy::default()).is_ok()
}

/// Checks a line item: string `id` and `product_id`, numeric `quantity` and
/// `price`, and values admitted by the policy's item rule.
pub fn validate_order_item(value: &Value, policy: &ValidationPolicy) -> bool {
    OrderItem::from_value(value, policy).is_ok_and(|item| item.is_countable(policy.item_rule))
}

impl Order {
    /// Parses an untrusted record into an order.
    ///
    /// Items that are structurally malformed are dropped from the result.
    /// Item quantity and price ranges are not checked here; aggregation
    /// applies the item rule so that typed orders are filtered the same way.
    pub fn from_value(
        value: &Value,
        policy: &ValidationPolicy,
    ) -> Result<Order, OrderRejection> {
        let obj = value.as_object().ok_or(OrderRejection::NotAnObject)?;

        let id = required_str(obj, "id")?;
        let customer_id = required_str(obj, "customer_id")?;
        let total_amount = required_number(obj, "total_amount")?;
        let status = required_str(obj, "status")?;
        let items = match present(obj, "items") {
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                return Err(OrderRejection::WrongType {
                    field: "items",
                    expected: "array",
                });
            }
            None if policy.require_items => {
                return Err(OrderRejection::MissingField { field: "items" });
            }
            None => &[],
        };
        let created_at = required_str(obj, "created_at")?;
        let updated_at = required_str(obj, "updated_at")?;

        if policy.require_non_empty_ids {
            if id.is_empty() {
                return Err(OrderRejection::EmptyField { field: "id" });
            }
            if customer_id.is_empty() {
                return Err(OrderRejection::EmptyField {
                    field: "customer_id",
                });
            }
        }
        if policy.reject_negative_total && total_amount < 0.0 {
            return Err(OrderRejection::NegativeTotal {
                total: total_amount,
            });
        }
        let status = OrderStatus::from(status);
        if policy.require_known_status && !status.is_known() {
            return Err(OrderRejection::UnknownStatus {
                status: status.to_string(),
            });
        }

        let items = items
            .iter()
            .filter_map(|raw| match OrderItem::from_value(raw, policy) {
                Ok(item) => Some(item),
                Err(reason) => {
                    tracing::debug!(order_id = %id, %reason, "dropping malformed order item");
                    metrics::counter!("orders_items_dropped_total").increment(1);
                    None
                }
            })
            .collect();

        Ok(Order {
            id: id.into(),
            customer_id: customer_id.into(),
            total_amount,
            status,
            items,
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        })
    }
}

impl OrderItem {
    /// Parses an untrusted line item.
    pub fn from_value(
        value: &Value,
        policy: &ValidationPolicy,
    ) -> Result<OrderItem, OrderRejection> {
        let obj = value.as_object().ok_or(OrderRejection::NotAnObject)?;

        let id = required_str(obj, "id")?;
        let product_id = required_str(obj, "product_id")?;
        let quantity = required_number(obj, "quantity")?;
        let price = required_number(obj, "price")?;
        let created_at = match present(obj, "created_at") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(OrderRejection::WrongType {
                    field: "created_at",
                    expected: "string",
                });
            }
            None if policy.require_item_timestamp => {
                return Err(OrderRejection::MissingField {
                    field: "created_at",
                });
            }
            None => None,
        };

        Ok(OrderItem {
            id: id.into(),
            product_id: product_id.into(),
            quantity,
            price,
            created_at,
        })
    }
}

/// Returns the field unless it is absent or null.
fn present<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, OrderRejection> {
    match present(obj, field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(OrderRejection::WrongType {
            field,
            expected: "string",
        }),
        None => Err(OrderRejection::MissingField { field }),
    }
}

fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, OrderRejection> {
    match present(obj, field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|x| x.is_finite())
            .ok_or(OrderRejection::WrongType {
                field,
                expected: "finite number",
            }),
        Some(_) => Err(OrderRejection::WrongType {
            field,
            expected: "number",
        }),
        None => Err(OrderRejection::MissingField { field }),
    }
}
